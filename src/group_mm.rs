use alloc::vec::Vec;
use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Denoiser, Budget, MmParam, TvError};
use crate::objective::group_norms;
use crate::mm::run_mm;
use crate::{Objective, DataFit};

/// Overlapping group majorization-minimization denoiser
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Minimizes the overlapping group total variation objective [`Objective::group_value`],
/// \\[
/// \frac12 \\|u - y\\|\_2^2 + \lambda \sum\_j \sqrt{\sum\_{k=0}^{K-1} (Du)\_{j-k}^2},
/// \\]
/// with the group size \\(K\\) of [`MmParam::group_size`].
/// The majorizer weight of a difference \\(i\\) collects every group containing it,
/// \\(\Lambda\_{ii} = \lambda \sum\_{k=0}^{K-1} 1 / r\_{i+k}\\).
/// A difference whose group norm vanishes is frozen with \\(\Lambda\_{ii}^{-1} = 0\\).
/// The iteration stops early once \\(\\|u\_{k+1} - u\_k\\|\_2 \le {\rm tol} \\|u\_k\\|\_2\\).
///
/// `group_size = 1` gives the same iterates as [`crate::ScalarMm`].
pub struct GroupMm<'a, L: LinAlg>
{
    /// denoiser parameters.
    pub par: MmParam<L::F>,
    obj: Option<Objective<'a, L>>,
    u: Option<Vec<L::F>>,
}

impl<'a, L: LinAlg> GroupMm<'a, L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        GroupMm {
            par: MmParam::default(),
            obj: None,
            u: None,
        }
    }

    /// Changes denoiser parameters.
    ///
    /// Returns [`GroupMm`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut MmParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<'a, L: LinAlg> Default for GroupMm<'a, L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

fn check_par<F: Float + Debug>(par: &MmParam<F>, n: usize) -> Result<(), TvError>
{
    let k = par.group_size;
    if k == 0 || k > n {
        log::error!("Invalid group_size {} for length {}", k, n);
        return Err(TvError::InvalidParam);
    }
    if par.tol.is_nan() {
        log::error!("Invalid tol {:?}", par.tol);
        return Err(TvError::InvalidParam);
    }
    Ok(())
}

impl<'a, L: LinAlg> Denoiser<'a, L> for GroupMm<'a, L>
where L::F: Float + Debug + LowerExp
{
    fn name(&self) -> &'static str
    {
        "GTV MM"
    }

    fn skip(&self, obj: &Objective<'a, L>) -> Option<&'static str>
    {
        if obj.data_fit != DataFit::Quad {
            Some("GTV MM solver only useable for quadratic data_fit")
        }
        else {
            None
        }
    }

    fn configure(&mut self, obj: Objective<'a, L>) -> Result<(), TvError>
    {
        if let Some(reason) = self.skip(&obj) {
            log::warn!("{}: {}", self.name(), reason);
            return Err(TvError::NotApplicable);
        }
        obj.validate()?;
        check_par(&self.par, obj.len())?;

        self.obj = Some(obj);
        self.u = None;
        Ok(())
    }

    fn run(&mut self, budget: Budget<'_, L::F>) -> Result<(), TvError>
    {
        let obj = self.obj.as_ref().ok_or(TvError::NotConfigured)?;
        self.u = None;
        check_par(&self.par, obj.len())?;

        let f0 = L::F::zero();
        let f1 = L::F::one();
        let reg = obj.reg;
        let k = self.par.group_size;

        let u = run_mm(self.name(), obj, &self.par, k, self.par.tol, budget, |du, w| {
            let r = group_norms::<L>(du, k);

            for (i, e) in w.iter_mut().enumerate() {
                let window = &r[i.. i + k];
                if window.iter().any(|ri| *ri <= f0) {
                    *e = f0;
                }
                else {
                    let s = window.iter().fold(f0, |acc, ri| acc + f1 / *ri);
                    *e = f1 / (reg * s);
                }
            }
        })?;

        self.u = Some(u);
        Ok(())
    }

    fn result(&self) -> Result<&[L::F], TvError>
    {
        self.u.as_deref().ok_or(TvError::NoResult)
    }
}
