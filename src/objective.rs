use alloc::vec;
use num_traits::{Float, Zero, One, NumCast};
use core::fmt::Debug;
use crate::solver::{LinAlg, Operator, TvError};
use crate::prox::huber;
use crate::DiffOp;

//

/// Data fidelity term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFit
{
    /// Quadratic \\(\frac12\\|r\\|\_2^2\\).
    Quad,
    /// Robust \\(\sum\_i h\_\delta(r\_i)\\) with the Huber function \\(h\_\delta\\).
    Huber,
}

/// Objective of 1-D total variation denoising
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\[
/// {\rm minimize} \ \phi(Au - y) + \lambda \\|Du\\|\_1,
/// \\]
/// where
/// * variables \\( u \in \mathbb{R}^n \\)
/// * \\( A \in \mathbb{R}^{n \times n} \\) as an observation linear operator
/// * \\( y \in \mathbb{R}^n \\) as an observation
/// * \\( D \\) as the first difference, see [`DiffOp`]
/// * \\( \phi \\) as the data fidelity, see [`DataFit`].
pub struct Objective<'a, L: LinAlg>
{
    /// Observation operator \\(A\\).
    pub op_a: &'a dyn Operator<L>,
    /// Regularization weight \\(\lambda \ge 0\\).
    pub reg: L::F,
    /// Observation \\(y\\).
    pub y: &'a [L::F],
    /// Initial value of every element of iterates.
    pub c: L::F,
    /// Transition threshold \\(\delta > 0\\) of [`DataFit::Huber`].
    pub delta: L::F,
    /// Data fidelity.
    pub data_fit: DataFit,
}

impl<'a, L: LinAlg> Clone for Objective<'a, L>
{
    fn clone(&self) -> Self
    {
        Objective {
            op_a: self.op_a,
            reg: self.reg,
            y: self.y,
            c: self.c,
            delta: self.delta,
            data_fit: self.data_fit,
        }
    }
}

impl<'a, L: LinAlg> Objective<'a, L>
{
    /// Creates an instance with quadratic data fidelity.
    ///
    /// Returns the [`Objective`] instance with `c = 0` and `delta = 0.9`.
    pub fn new(op_a: &'a dyn Operator<L>, reg: L::F, y: &'a [L::F]) -> Self
    {
        Objective {
            op_a, reg, y,
            c: L::F::zero(),
            delta: <L::F as NumCast>::from(0.9).unwrap(),
            data_fit: DataFit::Quad,
        }
    }

    /// Builder pattern of [`Objective::c`].
    pub fn c(mut self, c: L::F) -> Self
    {
        self.c = c;
        self
    }

    /// Builder pattern of [`Objective::delta`].
    pub fn delta(mut self, delta: L::F) -> Self
    {
        self.delta = delta;
        self
    }

    /// Builder pattern of [`Objective::data_fit`].
    pub fn data_fit(mut self, data_fit: DataFit) -> Self
    {
        self.data_fit = data_fit;
        self
    }

    /// Length \\(n\\) of signals.
    pub fn len(&self) -> usize
    {
        self.y.len()
    }

    /// Checks sizes and parameters.
    ///
    /// Returns `Err` with [`TvError::InvalidOp`] on dimension mismatch,
    /// or with [`TvError::InvalidParam`] on an invalid parameter.
    pub fn validate(&self) -> Result<(), TvError>
    where L::F: Debug
    {
        let n = self.y.len();
        let f0 = L::F::zero();

        if n == 0 {
            log::error!("Empty observation");
            return Err(TvError::InvalidOp);
        }
        if self.op_a.size() != (n, n) {
            log::error!("Size mismatch: op_a{:?}, y({})", self.op_a.size(), n);
            return Err(TvError::InvalidOp);
        }
        if !(self.reg >= f0) || !self.reg.is_finite() {
            log::error!("Invalid reg {:?}", self.reg);
            return Err(TvError::InvalidParam);
        }
        if !self.c.is_finite() {
            log::error!("Invalid c {:?}", self.c);
            return Err(TvError::InvalidParam);
        }
        if self.data_fit == DataFit::Huber && !(self.delta > f0) {
            log::error!("Invalid delta {:?}", self.delta);
            return Err(TvError::InvalidParam);
        }

        Ok(())
    }

    /// Objective value
    ///
    /// Returns \\(\phi(Au - y) + \lambda \\|Du\\|\_1\\).
    /// * `u` shall have the length \\(n\\).
    pub fn value(&self, u: &[L::F]) -> L::F
    {
        let n = self.y.len();
        assert_eq!(u.len(), n);

        let f0 = L::F::zero();
        let f1 = L::F::one();
        let half = <L::F as NumCast>::from(0.5).unwrap();

        let mut r = vec![f0; n];
        L::copy(self.y, &mut r);
        self.op_a.op(f1, u, -f1, &mut r);

        let fit = match self.data_fit {
            DataFit::Quad => {
                let nr = L::norm(&r);
                half * nr * nr
            },
            DataFit::Huber => {
                r.iter().fold(f0, |acc, e| acc + huber(*e, self.delta))
            },
        };

        fit + self.reg * tv_norm::<L>(u)
    }

    /// Objective value of overlapping group total variation
    ///
    /// Returns \\(\frac12\\|u - y\\|\_2^2 + \lambda \sum\_j r\_j\\) with
    /// \\(r\_j = \sqrt{\sum\_{k=0}^{K-1} (Du)\_{j-k}^2}\\), where out-of-range differences are zero.
    /// `group_size` \\(K = 1\\) gives [`Objective::value`] of quadratic fidelity with the identity \\(A\\).
    pub fn group_value(&self, u: &[L::F], group_size: usize) -> L::F
    {
        let n = self.y.len();
        assert_eq!(u.len(), n);

        let f0 = L::F::zero();
        let half = <L::F as NumCast>::from(0.5).unwrap();

        let mut r = vec![f0; n];
        L::copy(u, &mut r);
        L::add(-L::F::one(), self.y, &mut r);
        let nr = L::norm(&r);

        let du = diff::<L>(u);
        let pen = group_norms::<L>(&du, group_size).iter().fold(f0, |acc, e| acc + *e);

        half * nr * nr + self.reg * pen
    }
}

//

/// First difference \\(Du\\) as a new vector.
pub(crate) fn diff<L: LinAlg>(u: &[L::F]) -> alloc::vec::Vec<L::F>
{
    let n = u.len();
    let mut du = vec![L::F::zero(); n.saturating_sub(1)];
    Operator::<L>::op(&DiffOp::new(n), L::F::one(), u, L::F::zero(), &mut du);
    du
}

/// \\(\\|Du\\|\_1\\)
pub(crate) fn tv_norm<L: LinAlg>(u: &[L::F]) -> L::F
{
    L::abssum(&diff::<L>(u))
}

/// \\(r\_j = \sqrt{\sum\_{k=0}^{K-1} d\_{j-k}^2}\\), \\(j = 0, \ldots, m+K-2\\), for the differences \\(d \in \mathbb{R}^m\\).
pub(crate) fn group_norms<L: LinAlg>(du: &[L::F], group_size: usize) -> alloc::vec::Vec<L::F>
{
    let m = du.len();
    let len_r = (m + group_size).saturating_sub(1);

    let mut r = vec![L::F::zero(); len_r];
    for (j, e) in r.iter_mut().enumerate() {
        let lo = (j + 1).saturating_sub(group_size);
        let hi = j.min(m.saturating_sub(1));
        let mut sq = L::F::zero();
        if m > 0 {
            for d in &du[lo..= hi] {
                sq = sq + *d * *d;
            }
        }
        *e = sq.sqrt();
    }
    r
}
