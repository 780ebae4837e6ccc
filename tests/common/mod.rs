#![allow(dead_code)]

use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;

/// Standard normal sample by Box-Muller.
pub fn gaussian<R: Rng>(rng: &mut R) -> f64
{
    let u1: f64 = 1. - rng.gen::<f64>(); // (0, 1]
    let u2: f64 = rng.gen();
    (-2. * u1.ln()).sqrt() * (2. * std::f64::consts::PI * u2).cos()
}

/// `x` with additive Gaussian noise of standard deviation `noise`, reproducible by `seed`.
pub fn noisy(x: &[f64], noise: f64, seed: u64) -> Vec<f64>
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    x.iter().map(|e| e + noise * gaussian(&mut rng)).collect()
}

/// `[0, 0, 0, 5, 5, 5, 0, 0, 0]`
pub fn step9() -> Vec<f64>
{
    vec![0., 0., 0., 5., 5., 5., 0., 0., 0.]
}

/// Piecewise constant signal of `levels`, each repeated `len` times.
pub fn blocks(levels: &[f64], len: usize) -> Vec<f64>
{
    levels.iter().flat_map(|e| std::iter::repeat(*e).take(len)).collect()
}

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64
{
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0., |acc, (x, y)| f64::max(acc, (x - y).abs()))
}
