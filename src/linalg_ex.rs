use crate::solver::LinAlg;

/// Linear algebra extended subtrait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
pub trait LinAlgEx: LinAlg + Clone
{
    /// Calculates \\(\alpha G x + \beta y\\).
    ///
    /// * If `transpose` is `true`, Calculate \\(\alpha G^T x + \beta y\\) instead.
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `n_row` is a number of rows of \\(G\\).
    /// * `n_col` is a number of columns of \\(G\\).
    /// * `mat` is a matrix \\(G\\), stored in column-major.
    ///   The length of `mat` shall be `n_row * n_col`.
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be `n_col` (or `n_row` if `transpose` is `true`).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha G x + \beta y\\) (or \\(\alpha G^T x + \beta y\\) if `transpose` is `true`) on exit.
    ///   The length of `y` shall be `n_row` (or `n_col` if `transpose` is `true`).
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: Self::F, mat: &[Self::F], x: &[Self::F], beta: Self::F, y: &mut[Self::F]);

    /// Calculates the largest eigenvalue of a symmetric matrix \\(S\\) supplied in packed form.
    ///
    /// Returns `Some` with the eigenvalue,
    /// or `None` if the calculation does not converge within `max_sweep` or results in a non-finite value.
    /// * `mat` is the matrix \\(S\\) before entry, and is destroyed on exit.
    ///   It shall be stored in packed form (the upper-triangular part in column-wise).
    /// * `eps_zero` is a tolerance of relative magnitude of off-diagonal elements.
    /// * `max_sweep` is a max number of sweeps over all off-diagonal elements.
    fn max_eig(mat: &mut[Self::F], eps_zero: Self::F, max_sweep: usize) -> Option<Self::F>;
}
