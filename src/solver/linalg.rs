//! Linear algebra

use num_traits::Float;

/// Linear algebra trait.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Vector operations on slices of [`LinAlg::F`] used by the denoisers.
pub trait LinAlg
{
    /// Floating point data type used as scalars.
    type F: Float;

    /// Calculate 2-norm (or euclidean norm) \\(\\|x\\|_2=\sqrt{\sum_i x_i^2}\\).
    ///
    /// Returns the calculated norm.
    /// * `x` is a vector \\(x\\).
    fn norm(x: &[Self::F]) -> Self::F;

    /// Calculate inner product \\(x^T y\\).
    ///
    /// Returns the calculated product.
    /// * `x` and `y` shall have the same length.
    fn inner_prod(x: &[Self::F], y: &[Self::F]) -> Self::F;

    /// Copy from a vector to another vector.
    ///
    /// * `x` is a slice to copy.
    /// * `y` is a slice being copied to.
    ///   `x` and `y` shall have the same length.
    fn copy(x: &[Self::F], y: &mut[Self::F]);

    /// Calculate \\(\alpha x\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\) before entry, \\(\alpha x\\) on exit.
    fn scale(alpha: Self::F, x: &mut[Self::F]);

    /// Calculate \\(\alpha x + y\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    /// * `y` is a vector \\(y\\) before entry, \\(\alpha x + y\\) on exit.
    ///   `x` and `y` shall have the same length.
    fn add(alpha: Self::F, x: &[Self::F], y: &mut[Self::F]);

    /// Calculate \\(s\mathbb{1} + y\\).
    ///
    /// * `s` is a scalar \\(s\\).
    /// * `y` is a vector \\(y\\) before entry, \\(s\mathbb{1} + y\\) on exit.
    fn adds(s: Self::F, y: &mut[Self::F]);

    /// Calculate 1-norm (or sum of absolute values) \\(\\|x\\|_1=\sum_i |x_i|\\).
    ///
    /// Returns the calculated norm.
    /// * `x` is a vector \\(x\\).
    fn abssum(x: &[Self::F]) -> Self::F;
}
