use alloc::vec;
use num_traits::{Float, Zero, One};
use crate::solver::{Operator, TvError};
use crate::LinAlgEx;

/// Squared operator 2-norm
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Calculates \\(\\|K\\|_2^2 = \lambda\_{\max}(K^TK)\\), the squared largest singular value of \\(K\\),
/// by applying \\(K\\) to unit vectors and a Jacobi eigenvalue calculation of \\(K^TK\\).
///
/// Returns `Ok` with the squared norm,
/// or `Err` with [`TvError::NormFailure`] if the calculation does not converge or is not finite.
/// * `op` is \\(K\\) as a linear [`Operator`].
/// * `eps_zero` and `max_sweep` are passed to [`LinAlgEx::max_eig`].
pub fn sq_opnorm<L, O>(op: &O, eps_zero: L::F, max_sweep: usize) -> Result<L::F, TvError>
where L: LinAlgEx, O: Operator<L> + ?Sized
{
    let f0 = L::F::zero();
    let f1 = L::F::one();
    let (m, n) = op.size();

    if m == 0 || n == 0 {
        return Ok(f0);
    }

    // columns of K
    let mut cols = vec![f0; m * n];
    let mut e = vec![f0; n];
    for (c, col) in cols.chunks_mut(m).enumerate() {
        e[c] = f1;
        op.op(f1, &e, f0, col);
        e[c] = f0;
    }

    // K^T K in packed form
    let mut ktk = vec![f0; n * (n + 1) / 2];
    for c in 0.. n {
        let col_c = &cols[c * m.. (c + 1) * m];
        for r in 0..= c {
            let col_r = &cols[r * m.. (r + 1) * m];
            ktk[c * (c + 1) / 2 + r] = L::inner_prod(col_r, col_c);
        }
    }

    match L::max_eig(&mut ktk, eps_zero, max_sweep) {
        Some(e_max) if e_max.is_finite() => {
            // rounding may leave a tiny negative value for K = 0
            Ok(e_max.max(f0))
        },
        _ => {
            log::error!("Operator norm of size {:?} failed", (m, n));
            Err(TvError::NormFailure)
        },
    }
}

//

#[test]
fn test_sq_opnorm_diff()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, DiffOp};

    type L = FloatGeneric<f64>;

    for n in [1, 2, 3, 10, 25] {
        let d = DiffOp::new(n);
        let sq = sq_opnorm::<L, _>(&d, 1e-12, 100).unwrap();
        assert_float_eq!(sq, d.sq_norm::<f64>(), abs <= 1e-8);
    }
}

#[test]
fn test_sq_opnorm_dense()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, MatBuild};

    type L = FloatGeneric<f64>;

    // singular values 3 and 2
    let mut a = MatBuild::<L>::new((3, 2));
    a[(0, 0)] = 3.;
    a[(1, 1)] = 2.;

    let sq = sq_opnorm::<L, _>(&a, 1e-12, 100).unwrap();
    assert_float_eq!(sq, 9., abs <= 1e-10);
}
