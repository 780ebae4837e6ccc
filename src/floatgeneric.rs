use num_traits::Float;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use crate::solver::LinAlg;
use crate::LinAlgEx;

/// `num::Float`-generic [`LinAlgEx`] implementation
///
/// All numeric operations are written in pure Rust.
#[derive(Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

impl<F: Float> LinAlg for FloatGeneric<F>
{
    type F = F;

    fn norm(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + *u * *u;
        }
        sum.sqrt()
    }

    fn inner_prod(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }

    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *u;
        }
    }

    fn scale(alpha: F, x: &mut[F])
    {
        for u in x {
            *u = alpha * *u;
        }
    }

    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }

    fn adds(s: F, y: &mut[F])
    {
        for v in y {
            *v = *v + s;
        }
    }

    fn abssum(x: &[F]) -> F
    {
        x.iter().fold(F::zero(), |acc, u| acc + u.abs())
    }
}

//

struct MatIdx<'a, F: Float>
{
    n_row: usize,
    n_col: usize,
    mat: &'a[F],
    transpose: bool,
}

impl<'a, F: Float> MatIdx<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        let (r, c) = if !self.transpose {(r, c)} else {(c, r)};

        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdx<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

//

struct SpMatIdxMut<'a, F: Float>
{
    n: usize,
    mat: &'a mut[F],
}

impl<'a, F: Float> SpMatIdxMut<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n);
        assert!(c < self.n);

        let (r, c) = if r < c {(r, c)} else {(c, r)};

        c * (c + 1) / 2 + r
    }
}

impl<'a, F: Float> Index<(usize, usize)> for SpMatIdxMut<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

impl<'a, F: Float> IndexMut<(usize, usize)> for SpMatIdxMut<'a, F>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.idx(index);
        &mut self.mat[i]
    }
}

//

// cyclic Jacobi rotations, eigenvectors are not accumulated
fn jacobi_eig<F: Float>(spmat_x: &mut SpMatIdxMut<F>, tol: F, max_sweep: usize) -> bool
{
    let n = spmat_x.n;
    let f0 = F::zero();
    let f1 = F::one();
    let f2 = f1 + f1;

    for _ in 0.. max_sweep {
        let mut conv = true;

        for i in 0.. n {
            for j in i + 1.. n {
                let a = spmat_x[(i, i)];
                let b = spmat_x[(j, j)];
                let d = spmat_x[(i, j)];

                if (d * d > tol * a.abs() * b.abs()) && (d * d > tol) {
                    conv = false;

                    let zeta = (b - a) / (f2 * d);
                    let t = if zeta > f0 {
                        f1 / (zeta + (f1 + zeta * zeta).sqrt())
                    }
                    else {
                        -f1 / (-zeta + (f1 + zeta * zeta).sqrt())
                    };
                    let c = (f1 + t * t).sqrt().recip();
                    let s = c * t;

                    for k in 0.. n {
                        if k != i && k != j {
                            let xi = spmat_x[(k, i)];
                            let xj = spmat_x[(k, j)];
                            spmat_x[(k, i)] = c * xi - s * xj;
                            spmat_x[(k, j)] = s * xi + c * xj;
                        }
                    }

                    spmat_x[(i, i)] = c * c * a + s * s * b - f2 * c * s * d;
                    spmat_x[(j, j)] = s * s * a + c * c * b + f2 * c * s * d;
                    spmat_x[(i, j)] = f0;
                }
            }
        }

        if conv {
            return true;
        }
    }

    false
}

//

impl<F: Float> LinAlgEx for FloatGeneric<F>
{
    // y = a*mat*x + b*y
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);
        if transpose {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);
        } else {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);
        };

        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. y.len() {
            let mut mat_x = F::zero();
            for c in 0.. x.len() {
                mat_x = mat_x + mat[(r, c)] * x[c];
            }
            y[r] = alpha * mat_x + beta * y[r];
        }
    }

    fn max_eig(mat: &mut[F], eps_zero: F, max_sweep: usize) -> Option<F>
    {
        let sn = mat.len();
        let n = (F::from(8 * sn + 1)?.sqrt().to_usize()? - 1) / 2;
        assert_eq!(n * (n + 1) / 2, sn);

        if n == 0 {
            return Some(F::zero());
        }

        let mut spmat_x = SpMatIdxMut {
            n, mat,
        };

        if !jacobi_eig(&mut spmat_x, eps_zero, max_sweep) {
            log::error!("Eigenvalue not converged in {} sweeps", max_sweep);
            return None;
        }

        let mut e_max = F::neg_infinity();
        for i in 0.. n {
            e_max = e_max.max(spmat_x[(i, i)]);
        }

        if e_max.is_finite() {
            Some(e_max)
        }
        else {
            log::error!("Eigenvalue not finite");
            None
        }
    }
}

//

#[test]
fn test_max_eig1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    // eigenvalues 1, 2, 4 rotated
    let mut array = [ // upper-triangle, column-wise
        3.,
        1.,  3.,
        0.,  0.,  1.,
    ];

    let e = L::max_eig(&mut array, 1e-12, 50).unwrap();
    assert_float_eq!(e, 4., abs <= 1e-9);
}

#[test]
fn test_max_eig2()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let mut array = [
        -2.,
         0., -5.,
    ];

    let e = L::max_eig(&mut array, 1e-12, 50).unwrap();
    assert_float_eq!(e, -2., abs <= 1e-12);
}

#[test]
fn test_max_eig_no_sweep()
{
    type L = FloatGeneric<f64>;

    let mut array = [
        1.,
        1., 1.,
    ];

    assert_eq!(L::max_eig(&mut array, 1e-12, 0), None);
}

#[test]
fn test_abssum1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    assert_float_eq!(L::abssum(&[1., -2., 0.5, -0.25]), 3.75, abs <= 1e-15);
    assert_float_eq!(L::abssum(&[]), 0., abs <= 0.);
}
