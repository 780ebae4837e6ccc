//! Proximal primitives

use num_traits::Float;

/// Soft-thresholding \\({\rm sign}(w) \max(|w| - \mu, 0)\\), the proximal operator of \\(\mu|\cdot|\\).
///
/// * `mu` shall be nonnegative.
pub fn soft_threshold<F: Float>(w: F, mu: F) -> F
{
    // w - clip(w, -mu, mu)
    w - w.max(-mu).min(mu)
}

/// Elementwise [`soft_threshold`] in place.
pub fn soft_threshold_slice<F: Float>(w: &mut[F], mu: F)
{
    for e in w {
        *e = soft_threshold(*e, mu);
    }
}

/// Huber function \\(h\_\delta(r)\\): \\(r^2/2\\) if \\(|r|\le\delta\\), \\(\delta(|r|-\delta/2)\\) otherwise.
pub fn huber<F: Float>(r: F, delta: F) -> F
{
    let half = F::from(0.5).unwrap();
    let a = r.abs();

    if a <= delta {
        half * r * r
    }
    else {
        delta * (a - half * delta)
    }
}

/// Proximal operator \\({\rm prox}\_{\sigma h^\*}\\) of the conjugate of \\(h(v) = h\_\delta(v - y)\\), scaled by \\(\sigma\\).
///
/// Returns the dual update of the fidelity block for a point `x`
/// and an observation sample `y`.
pub fn huber_conj_prox<F: Float>(x: F, y: F, sigma: F, delta: F) -> F
{
    let f0 = F::zero();
    let f1 = F::one();

    let r = sigma * y - x;
    let p = if r.abs() < delta * (sigma + f1) {
        sigma * (y + x) / (sigma + f1)
    }
    else {
        let sgn = if r > f0 {f1} else if r < f0 {-f1} else {f0};
        x + delta * sgn
    };

    x - p
}

/// Direct algorithm of 1-D total variation denoising [Condat 2013].
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Calculates the exact minimizer of \\(\frac12\\|u - y\\|\_2^2 + \lambda \\|Du\\|\_1\\)
/// by following the taut string in a single pass.
/// * `y` is the observation \\(y\\).
/// * `lambda` is \\(\lambda \ge 0\\).
/// * `u` is the minimizer \\(u\\) on exit. `y` and `u` shall have the same length.
pub fn taut_string<F: Float>(y: &[F], lambda: F, u: &mut[F])
{
    let n = y.len();
    assert_eq!(u.len(), n);

    if n == 0 {
        return;
    }

    let f0 = F::zero();
    let twolambda = lambda + lambda;
    let minlambda = -lambda;
    let cnt = |a: usize, b: usize| F::from(b - a + 1).unwrap();

    // k: current sample, k0: beginning of the current segment
    let mut k = 0;
    let mut k0 = 0;
    // umin, umax: dual variable, vmin, vmax: bounds of the segment value
    let mut umin = lambda;
    let mut umax = minlambda;
    let mut vmin = y[0] - lambda;
    let mut vmax = y[0] + lambda;
    // last positions where umax = -lambda and umin = lambda
    let mut kplus = 0;
    let mut kminus = 0;

    loop {
        while k == n - 1 {
            if umin < f0 {
                // vmin too high, negative jump
                loop {
                    u[k0] = vmin;
                    k0 += 1;
                    if k0 > kminus {break;}
                }
                if k0 == n {
                    return;
                }
                k = k0;
                kminus = k0;
                vmin = y[k0];
                umin = lambda;
                umax = vmin + umin - vmax;
            }
            else if umax > f0 {
                // vmax too low, positive jump
                loop {
                    u[k0] = vmax;
                    k0 += 1;
                    if k0 > kplus {break;}
                }
                if k0 == n {
                    return;
                }
                k = k0;
                kplus = k0;
                vmax = y[k0];
                umax = minlambda;
                umin = vmax + umax - vmin;
            }
            else {
                vmin = vmin + umin / cnt(k0, k);
                loop {
                    u[k0] = vmin;
                    k0 += 1;
                    if k0 > k {break;}
                }
                return;
            }
        }

        umin = umin + y[k + 1] - vmin;
        if umin < minlambda {
            // negative jump
            loop {
                u[k0] = vmin;
                k0 += 1;
                if k0 > kminus {break;}
            }
            k = k0;
            kminus = k0;
            kplus = k0;
            vmin = y[k0];
            vmax = vmin + twolambda;
            umin = lambda;
            umax = minlambda;
            continue;
        }

        umax = umax + y[k + 1] - vmax;
        if umax > lambda {
            // positive jump
            loop {
                u[k0] = vmax;
                k0 += 1;
                if k0 > kplus {break;}
            }
            k = k0;
            kminus = k0;
            kplus = k0;
            vmax = y[k0];
            vmin = vmax - twolambda;
            umin = lambda;
            umax = minlambda;
            continue;
        }

        // no jump
        k += 1;
        if umin >= lambda {
            kminus = k;
            vmin = vmin + (umin - lambda) / cnt(k0, kminus);
            umin = lambda;
        }
        if umax <= minlambda {
            kplus = k;
            vmax = vmax + (umax + lambda) / cnt(k0, kplus);
            umax = minlambda;
        }
    }
}

//

#[test]
fn test_soft_threshold1()
{
    use float_eq::assert_float_eq;

    assert_float_eq!(soft_threshold(3., 1.), 2., abs <= 1e-15);
    assert_float_eq!(soft_threshold(-3., 1.), -2., abs <= 1e-15);
    assert_float_eq!(soft_threshold(0.5, 1.), 0., abs <= 1e-15);
    assert_float_eq!(soft_threshold(-1., 1.), 0., abs <= 1e-15);
}

#[test]
fn test_soft_threshold_idempotent()
{
    for i in -40..= 40 {
        let w = i as f64 * 0.37;
        for mu in [0., 0.1, 1., 2.5] {
            let s = soft_threshold(w, mu);
            assert_eq!(soft_threshold(s, 0.), s);
        }
    }
}

#[test]
fn test_huber_conj_prox_moreau()
{
    use float_eq::assert_float_eq;

    // prox_{sigma h*}(x) = x - sigma prox_{h/sigma}(x/sigma), h = huber(. - y)
    let (sigma, delta, y) = (0.5, 0.9, 1.3);
    for i in -20..= 20 {
        let x = i as f64 * 0.31;
        let v = x / sigma - y;
        let p = if (sigma * v / (1. + sigma)).abs() <= delta {
            sigma * v / (1. + sigma)
        }
        else {
            v - v.signum() * delta / sigma
        };
        let reference = x - sigma * (y + p);
        assert_float_eq!(huber_conj_prox(x, y, sigma, delta), reference, abs <= 1e-12);
    }
}

#[test]
fn test_taut_string_step()
{
    use float_eq::assert_float_eq;

    let y = [0., 0., 0., 5., 5., 5., 0., 0., 0.];
    let mut u = [0.; 9];
    taut_string(&y, 1., &mut u);

    let (a, b) = (1. / 3., 5. - 2. / 3.);
    assert_float_eq!(u.as_slice(), [a, a, a, b, b, b, a, a, a].as_slice(), abs_all <= 1e-12);
}

#[test]
fn test_taut_string_flat()
{
    use float_eq::assert_float_eq;

    // large lambda gives the mean
    let y = [1., 4., -2., 3.];
    let mut u = [0.; 4];
    taut_string(&y, 100., &mut u);
    assert_float_eq!(u.as_slice(), [1.5; 4].as_slice(), abs_all <= 1e-12);

    // zero lambda gives the observation
    taut_string(&y, 0., &mut u);
    assert_float_eq!(u.as_slice(), y.as_slice(), abs_all <= 1e-12);

    let mut u1 = [0.];
    taut_string(&[7.], 1., &mut u1);
    assert_float_eq!(u1[0], 7., abs <= 1e-12);
}
