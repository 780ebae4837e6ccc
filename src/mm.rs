use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Operator, Denoiser, Budget, MmParam, TvError};
use crate::objective::diff;
use crate::{Objective, DataFit, DiffOp};

//

// Solves (diag(w) + D D^T) b = d, a symmetric positive definite tridiagonal system,
// by the Thomas algorithm. `d` is replaced with `b` on exit.
fn solve_tridiag<F: Float>(w: &[F], d: &mut[F], work: &mut[F])
{
    let m = d.len();
    assert_eq!(w.len(), m);
    assert_eq!(work.len(), m);

    if m == 0 {
        return;
    }

    let f1 = F::one();
    let f2 = f1 + f1;

    // forward elimination, work holds the modified super-diagonal
    let mut denom = f2 + w[0];
    work[0] = -f1 / denom;
    d[0] = d[0] / denom;
    for i in 1.. m {
        denom = f2 + w[i] + work[i - 1];
        work[i] = -f1 / denom;
        d[i] = (d[i] + d[i - 1]) / denom;
    }

    // back substitution
    for i in (0.. m - 1).rev() {
        d[i] = d[i] - work[i] * d[i + 1];
    }
}

/// One majorization-minimization step for the weights `w` of the majorizer.
///
/// \\(u = y - D^T (W + DD^T)^{-1} Dy\\), where \\(W = {\bf diag}(w)\\).
pub(crate) struct MmStep<F>
{
    dy: Vec<F>,
    b: Vec<F>,
    work: Vec<F>,
}

impl<F: Float> MmStep<F>
{
    pub(crate) fn new<L: LinAlg<F=F>>(y: &[F]) -> Self
    {
        let dy = diff::<L>(y);
        let m = dy.len();

        MmStep {
            dy,
            b: vec![F::zero(); m],
            work: vec![F::zero(); m],
        }
    }

    pub(crate) fn apply<L: LinAlg<F=F>>(&mut self, w: &[F], y: &[F], u: &mut[F])
    {
        let f1 = F::one();

        L::copy(&self.dy, &mut self.b);
        solve_tridiag(w, &mut self.b, &mut self.work);

        L::copy(y, u);
        Operator::<L>::trans_op(&DiffOp::new(y.len()), -f1, &self.b, f1, u);
    }
}

/// Runs a majorization-minimization loop shared by [`ScalarMm`] and [`crate::GroupMm`].
///
/// * `weights` takes the differences \\(Du\\) and sets the diagonal \\(w\\) of the majorizer.
/// * `tol` is the relative change of iterates for early exit, non-positive to disable.
pub(crate) fn run_mm<L, W>(
    name: &str, obj: &Objective<'_, L>, par: &MmParam<L::F>, group_size: usize, tol: L::F,
    budget: Budget<'_, L::F>, mut weights: W
) -> Result<Vec<L::F>, TvError>
where L: LinAlg, L::F: Float + Debug + LowerExp, W: FnMut(&[L::F], &mut[L::F])
{
    log::info!("----- {}: Initializing", name);

    let y = obj.y;
    let n = y.len();
    let f0 = L::F::zero();
    let f1 = L::F::one();

    let mut u = vec![f0; n];
    L::copy(y, &mut u);

    if obj.reg <= f0 {
        log::info!("----- {}: reg = 0, observation as is", name);
        return Ok(u);
    }

    let mut step = MmStep::<L::F>::new::<L>(y);
    let mut w = vec![f0; n - 1];
    let mut u_prev = vec![f0; n];

    log::info!("----- {}: Started", name);
    let iters = budget.drive(&mut u, |i, u| {
        L::copy(u, &mut u_prev);

        let du = diff::<L>(u);
        weights(&du, &mut w);
        step.apply::<L>(&w, y, u);

        let cost = obj.group_value(u, group_size);
        if par.log_period > 0 && i % par.log_period == 0 {
            log::debug!("{}: cost {:.6e}", i, cost);
        }
        else {
            log::trace!("{}: cost {:.6e}", i, cost);
        }

        if tol > f0 {
            let norm_prev = L::norm(&u_prev);
            L::add(-f1, u, &mut u_prev);
            let change = L::norm(&u_prev);
            if change <= tol * norm_prev {
                log::debug!("{}: relative change {:.2e} <= tol", i, change / norm_prev.max(L::F::min_positive_value()));
                return Ok(false);
            }
        }

        Ok(true)
    })?;

    log::info!("----- {}: Finished in {} iterations", name, iters);
    Ok(u)
}

//

/// Majorization-minimization denoiser
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Each iteration majorizes \\(\lambda\\|Du\\|\_1\\) at the current iterate \\(u\_k\\) by
/// \\(\frac12 (Du)^T \Lambda\_k (Du) + {\rm const}\\) with \\(\Lambda\_k = {\bf diag}(\lambda / |Du\_k|)\\), and minimizes
/// the majorized objective in closed form:
/// \\[
/// u\_{k+1} = y - D^T (\Lambda\_k^{-1} + DD^T)^{-1} Dy.
/// \\]
/// The iteration starts at \\(u\_0 = y\\), because a constant signal is a fixed point of the map.
/// The objective never increases.
/// Only [`DataFit::Quad`] with the identity observation is modeled; [`Objective::op_a`] is not used.
pub struct ScalarMm<'a, L: LinAlg>
{
    /// denoiser parameters.
    pub par: MmParam<L::F>,
    obj: Option<Objective<'a, L>>,
    u: Option<Vec<L::F>>,
}

impl<'a, L: LinAlg> ScalarMm<'a, L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        ScalarMm {
            par: MmParam::default(),
            obj: None,
            u: None,
        }
    }

    /// Changes denoiser parameters.
    ///
    /// Returns [`ScalarMm`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut MmParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<'a, L: LinAlg> Default for ScalarMm<'a, L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<'a, L: LinAlg> Denoiser<'a, L> for ScalarMm<'a, L>
where L::F: Float + Debug + LowerExp
{
    fn name(&self) -> &'static str
    {
        "TV MM"
    }

    fn skip(&self, obj: &Objective<'a, L>) -> Option<&'static str>
    {
        if obj.data_fit != DataFit::Quad {
            Some("TV MM solver only useable for quadratic data_fit")
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

        self.obj = Some(obj);
        self.u = None;
        Ok(())
    }

    fn run(&mut self, budget: Budget<'_, L::F>) -> Result<(), TvError>
    {
        let obj = self.obj.as_ref().ok_or(TvError::NotConfigured)?;
        self.u = None;

        let f0 = L::F::zero();
        let reg = obj.reg;

        let u = run_mm(self.name(), obj, &self.par, 1, f0, budget, |du, w| {
            for (d, e) in du.iter().zip(w) {
                *e = d.abs() / reg;
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

//

#[test]
fn test_solve_tridiag1()
{
    use float_eq::assert_float_eq;

    // [3 -1 0; -1 2 -1; 0 -1 4] b = d
    let w = [1., 0., 2.];
    let b_ref = [1., 2., -1.];
    let mut d = [3. * 1. - 2., -1. + 4. + 1., -2. - 4.];
    let mut work = [0.; 3];

    solve_tridiag(&w, &mut d, &mut work);
    assert_float_eq!(d.as_slice(), b_ref.as_slice(), abs_all <= 1e-12);
}
