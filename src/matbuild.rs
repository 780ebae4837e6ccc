use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use num_traits::Zero;
use crate::solver::Operator;
use crate::{LinAlgEx, MatOp};

//

/// Matrix builder
///
/// Matrix struct which owns a `Vec` of column-major data array and is able to be converted as [`MatOp`].
/// Use this to give a dense observation operator.
#[derive(Clone)]
pub struct MatBuild<L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: Vec<L::F>,
}

impl<L: LinAlgEx> MatBuild<L>
{
    /// Creates an instance.
    ///
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `(n_row, n_col)` is the matrix size.
    pub fn new((n_row, n_col): (usize, usize)) -> Self
    {
        MatBuild {
            n_row, n_col,
            array: vec![L::F::zero(); n_row * n_col],
        }
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    /// Converted as [`MatOp`].
    ///
    /// Returns the [`MatOp`] borrowing the internal data array.
    pub fn as_op(&self) -> MatOp<'_, L>
    {
        MatOp::new((self.n_row, self.n_col), &self.array)
    }

    /// Data by a function.
    ///
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        for c in 0.. self.n_col {
            for r in 0.. self.n_row {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

impl<L: LinAlgEx> Operator<L> for MatBuild<L>
{
    fn size(&self) -> (usize, usize)
    {
        self.size()
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.as_op().op(alpha, x, beta, y)
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.as_op().trans_op(alpha, x, beta, y)
    }
}

impl<L: LinAlgEx> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl<L: LinAlgEx> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let m = MatBuild::<L>::new((2, 2)).by_fn(|r, c| (r * 2 + c) as f64);
    assert_float_eq!(m[(0, 1)], 1., abs <= 1e-12);
    assert_float_eq!(m[(1, 0)], 2., abs <= 1e-12);

    let y = &mut[0.; 2];
    m.op(1., &[1., 1.], 0., y);
    assert_float_eq!(y.as_slice(), [1., 5.].as_slice(), abs_all <= 1e-12);
}
