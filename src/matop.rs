use crate::solver::{LinAlg, Operator};
use crate::LinAlgEx;

//

/// Matrix operator
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Dense general matrix struct which borrows a slice of column-major data array and implements [`Operator`].
pub struct MatOp<'a, L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: &'a[L::F],
}

impl<'a, L: LinAlgEx> MatOp<'a, L>
{
    /// Creates an instance
    ///
    /// Returns [`MatOp`] instance.
    /// * `(n_row, n_col)`: Matrix size.
    /// * `array`: data array slice of column-major matrix data.
    pub fn new((n_row, n_col): (usize, usize), array: &'a[L::F]) -> Self
    {
        assert_eq!(n_row * n_col, array.len());

        MatOp {
            n_row, n_col, array,
        }
    }

    fn op_impl(&self, transpose: bool, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        if self.n_row > 0 && self.n_col > 0 {
            L::transform_ge(transpose, self.n_row, self.n_col, alpha, self.array, x, beta, y)
        }
        else {
            L::scale(beta, y);
        }
    }
}

impl<'a, L: LinAlgEx> Operator<L> for MatOp<'a, L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(false, alpha, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(true, alpha, x, beta, y);
    }
}

//

/// Identity operator
///
/// \\(I \in \mathbb{R}^{n \times n}\\), the observation operator of plain denoising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityOp
{
    n: usize,
}

impl IdentityOp
{
    /// Creates an instance of size `n`.
    pub fn new(n: usize) -> Self
    {
        IdentityOp {n}
    }
}

impl<L: LinAlg> Operator<L> for IdentityOp
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        L::scale(beta, y);
        L::add(alpha, x, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        L::scale(beta, y);
        L::add(alpha, x, y);
    }
}

//

#[test]
fn test_matop1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let array = &[ // column-major
        1., 4.,
        2., 5.,
        3., 6.,
    ];
    let x = &[1., 0., -1.];
    let y = &mut[1., 1.];

    let m = MatOp::<L>::new((2, 3), array);

    m.op(2., x, 1., y);
    assert_float_eq!(y.as_slice(), [-3., -3.].as_slice(), abs_all <= 1e-12);

    let xt = &[1., -1.];
    let yt = &mut[0.; 3];
    m.trans_op(1., xt, 0., yt);
    assert_float_eq!(yt.as_slice(), [-3., -3., -3.].as_slice(), abs_all <= 1e-12);
}

#[test]
fn test_identity1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let i = IdentityOp::new(3);
    let y = &mut[1., 2., 3.];

    Operator::<L>::op(&i, -1., &[1., 1., 1.], 2., y);
    assert_float_eq!(y.as_slice(), [1., 3., 5.].as_slice(), abs_all <= 1e-12);
}
