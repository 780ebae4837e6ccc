use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Float, Zero, One, NumCast};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Operator, ConvergenceMonitor, Denoiser, Budget, PrimalDualParam, Formulation, TvError};
use crate::prox::{soft_threshold, huber_conj_prox};
use crate::{LinAlgEx, Objective, DataFit, DiffOp, CumSumOp, SelectOp, ComposeOp, StackOp, MaxIter, sq_opnorm};

//

/// Primal-dual splitting denoiser
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Condat-Vu splitting of
/// \\[
/// {\rm minimize} \ \phi(Bv - y) + \lambda \\|Pv\\|\_1,
/// \\]
/// where \\(B = A, P = D, u = v\\) for [`Formulation::Analysis`],
/// and \\(B = AL, P = S, u = Lv\\) for [`Formulation::Synthesis`]
/// with [`CumSumOp`] \\(L\\) and [`SelectOp`] \\(S\\).
///
/// Step sizes are \\(\sigma\\) of [`PrimalDualParam::sigma`] and
/// * \\(\tau = 1 / (\\|B^TB\\|\_2 / 2 + \sigma \\|P\\|\_2^2)\\) for [`DataFit::Quad`],
///   where the quadratic fidelity enters by its gradient,
/// * \\(\tau = 1 / (\sigma \\|K\\|\_2^2)\\), \\(K = \begin{bmatrix} P \\\\ B \end{bmatrix}\\) for [`DataFit::Huber`],
///   where the fidelity enters by the proximal operator of its conjugate.
///
/// Both norms are exact so that \\(\tau\sigma\\|K\\|\_2^2 \le 1\\) holds.
/// Every iteration is relaxed by \\(\eta\\) of [`PrimalDualParam::eta`].
/// The loop is driven by a [`ConvergenceMonitor`]; [`Budget::Iter`] is treated as [`MaxIter`].
pub struct PrimalDual<'a, L: LinAlg>
{
    /// denoiser parameters.
    pub par: PrimalDualParam<L::F>,
    obj: Option<Objective<'a, L>>,
    u: Option<Vec<L::F>>,
}

impl<'a, L: LinAlg> PrimalDual<'a, L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        PrimalDual {
            par: PrimalDualParam::default(),
            obj: None,
            u: None,
        }
    }

    /// Changes denoiser parameters.
    ///
    /// Returns [`PrimalDual`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut PrimalDualParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<'a, L: LinAlg> Default for PrimalDual<'a, L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

//

fn check_par<F: Float + Debug>(par: &PrimalDualParam<F>) -> Result<(), TvError>
{
    let f0 = F::zero();
    let f2 = F::one() + F::one();
    if !(par.eta > f0 && par.eta < f2) {
        log::error!("Invalid eta {:?}", par.eta);
        return Err(TvError::InvalidParam);
    }
    if !(par.sigma > f0) || !par.sigma.is_finite() {
        log::error!("Invalid sigma {:?}", par.sigma);
        return Err(TvError::InvalidParam);
    }
    Ok(())
}

// prox of the conjugate of reg*|.|_1 scaled by sigma, in place
fn tv_dual_prox<F: Float>(x: &mut[F], sigma: F, reg: F)
{
    for e in x {
        *e = *e - sigma * soft_threshold(*e / sigma, reg / sigma);
    }
}

// x <- 2 x_new - x
fn extrapolate<L: LinAlg>(x_new: &[L::F], x: &mut[L::F])
{
    let f1 = L::F::one();
    L::scale(-f1, x);
    L::add(f1 + f1, x_new, x);
}

// x <- eta x_new + (1 - eta) x
fn relax<L: LinAlg>(eta: L::F, x_new: &[L::F], x: &mut[L::F])
{
    L::scale(L::F::one() - eta, x);
    L::add(eta, x_new, x);
}

struct Split<'o, 'a, L: LinAlg, P, B>
{
    obj: &'o Objective<'a, L>,
    par: &'o PrimalDualParam<L::F>,
    op_p: P,
    op_b: B,
    // synthesis map of u from the primal variable
    synth: Option<CumSumOp>,
}

impl<'o, 'a, L, P, B> Split<'o, 'a, L, P, B>
where L: LinAlgEx, L::F: Float + Debug + LowerExp, P: Operator<L>, B: Operator<L>
{
    fn signal(&self, v: &[L::F], u: &mut[L::F])
    {
        match &self.synth {
            Some(cs) => Operator::<L>::op(cs, L::F::one(), v, L::F::zero(), u),
            None => L::copy(v, u),
        }
    }

    fn tau(&self, sq_norm_p: L::F) -> Result<L::F, TvError>
    {
        let f1 = L::F::one();
        let half = <L::F as NumCast>::from(0.5).unwrap();
        let sigma = self.par.sigma;

        let denom = match self.obj.data_fit {
            DataFit::Quad => {
                let sq_norm_b = sq_opnorm::<L, _>(&self.op_b, self.par.eps_eig, self.par.max_eig_sweep)?;
                log::debug!("||B^T B||: {:.3e}, ||P||^2: {:.3e}", sq_norm_b, sq_norm_p);
                sq_norm_b * half + sigma * sq_norm_p
            },
            DataFit::Huber => {
                let op_k = StackOp::<L, _, _>::new(&self.op_p, &self.op_b);
                let sq_norm_k = sq_opnorm::<L, _>(&op_k, self.par.eps_eig, self.par.max_eig_sweep)?;
                log::debug!("||K||^2: {:.3e}", sq_norm_k);
                sigma * sq_norm_k
            },
        };

        let tau = f1 / denom;
        if !(denom > L::F::zero()) || !tau.is_finite() {
            log::error!("Primal step size is not finite: denominator {:?}", denom);
            return Err(TvError::NormFailure);
        }
        Ok(tau)
    }

    fn iterate(&self, v0: Vec<L::F>, sq_norm_p: L::F, monitor: &mut dyn ConvergenceMonitor<L::F>) -> Result<Vec<L::F>, TvError>
    {
        let obj = self.obj;
        let par = self.par;
        let y = obj.y;
        let n = y.len();
        let m = self.op_p.size().0;
        let f0 = L::F::zero();
        let f1 = L::F::one();

        let sigma = par.sigma;
        let eta = par.eta;
        let tau = self.tau(sq_norm_p)?;
        log::debug!("tau: {:.3e}, sigma: {:.3e}, eta: {:.3e}", tau, sigma, eta);

        let mut v = v0;
        let mut v_tmp = vec![f0; n];
        let mut v_ex = vec![f0; n];
        let mut z = vec![f0; m];
        let mut z_tmp = vec![f0; m];
        let mut z_ex = vec![f0; m];
        let mut r = vec![f0; n];

        // fidelity dual starts at B v0 = A u0
        let mut wf = vec![f0; n];
        let mut wf_tmp = vec![f0; n];
        if obj.data_fit == DataFit::Huber {
            self.op_b.op(f1, &v, f0, &mut wf);
        }

        let mut u = vec![f0; n];
        self.signal(&v, &mut u);

        log::info!("----- Started");
        let mut i = 0;
        while monitor.should_continue(i, &u) {
            match (obj.data_fit, par.swap) {
                (DataFit::Quad, false) => {
                    // dual first
                    L::copy(&z, &mut z_tmp);
                    self.op_p.op(sigma, &v, f1, &mut z_tmp);
                    tv_dual_prox(&mut z_tmp, sigma, obj.reg);

                    L::copy(&z, &mut z_ex);
                    extrapolate::<L>(&z_tmp, &mut z_ex);

                    L::copy(y, &mut r);
                    self.op_b.op(f1, &v, -f1, &mut r);
                    L::copy(&v, &mut v_tmp);
                    self.op_b.trans_op(-tau, &r, f1, &mut v_tmp);
                    self.op_p.trans_op(-tau, &z_ex, f1, &mut v_tmp);
                },
                (DataFit::Quad, true) => {
                    // primal first
                    L::copy(y, &mut r);
                    self.op_b.op(f1, &v, -f1, &mut r);
                    L::copy(&v, &mut v_tmp);
                    self.op_b.trans_op(-tau, &r, f1, &mut v_tmp);
                    self.op_p.trans_op(-tau, &z, f1, &mut v_tmp);

                    L::copy(&v, &mut v_ex);
                    extrapolate::<L>(&v_tmp, &mut v_ex);

                    L::copy(&z, &mut z_tmp);
                    self.op_p.op(sigma, &v_ex, f1, &mut z_tmp);
                    tv_dual_prox(&mut z_tmp, sigma, obj.reg);
                },
                (DataFit::Huber, _) => {
                    L::copy(&v, &mut v_tmp);
                    self.op_p.trans_op(-tau, &z, f1, &mut v_tmp);
                    self.op_b.trans_op(-tau, &wf, f1, &mut v_tmp);

                    L::copy(&v, &mut v_ex);
                    extrapolate::<L>(&v_tmp, &mut v_ex);

                    L::copy(&z, &mut z_tmp);
                    self.op_p.op(sigma, &v_ex, f1, &mut z_tmp);
                    tv_dual_prox(&mut z_tmp, sigma, obj.reg);

                    L::copy(&wf, &mut wf_tmp);
                    self.op_b.op(sigma, &v_ex, f1, &mut wf_tmp);
                    for (e, y_i) in wf_tmp.iter_mut().zip(y) {
                        *e = huber_conj_prox(*e, *y_i, sigma, obj.delta);
                    }

                    relax::<L>(eta, &wf_tmp, &mut wf);
                },
            }

            relax::<L>(eta, &v_tmp, &mut v);
            relax::<L>(eta, &z_tmp, &mut z);
            self.signal(&v, &mut u);
            i += 1;

            if par.log_period > 0 && i % par.log_period == 0 {
                log::debug!("{}: value {:.6e}", i, obj.value(&u));
            }
            else {
                log::trace!("{}: value {:.6e}", i, obj.value(&u));
            }
        }

        log::info!("----- Finished in {} iterations", i);
        Ok(u)
    }
}

//

impl<'a, L: LinAlgEx> Denoiser<'a, L> for PrimalDual<'a, L>
where L::F: Float + Debug + LowerExp
{
    fn name(&self) -> &'static str
    {
        "CondatVu"
    }

    fn skip(&self, _obj: &Objective<'a, L>) -> Option<&'static str>
    {
        None
    }

    fn configure(&mut self, obj: Objective<'a, L>) -> Result<(), TvError>
    {
        obj.validate()?;
        check_par(&self.par)?;

        self.obj = Some(obj);
        self.u = None;
        Ok(())
    }

    fn run(&mut self, budget: Budget<'_, L::F>) -> Result<(), TvError>
    {
        let obj = self.obj.as_ref().ok_or(TvError::NotConfigured)?;
        self.u = None;
        check_par(&self.par)?;

        log::info!("----- Initializing {}", self.name());
        log::debug!("{:?}", self.par);

        let mut max_iter;
        let monitor: &mut dyn ConvergenceMonitor<L::F> = match budget {
            Budget::Iter(n_iter) => {
                max_iter = MaxIter::new(n_iter);
                &mut max_iter
            },
            Budget::Monitor(m) => m,
        };

        let n = obj.len();
        let f0 = L::F::zero();
        let mut v0 = vec![f0; n];

        let u = match self.par.formulation {
            Formulation::Analysis => {
                L::adds(obj.c, &mut v0);
                let op_d = DiffOp::new(n);
                let split = Split {
                    obj, par: &self.par,
                    op_p: op_d,
                    op_b: obj.op_a,
                    synth: None,
                };
                split.iterate(v0, op_d.sq_norm(), monitor)?
            },
            Formulation::Synthesis => {
                v0[0] = obj.c;
                let sq_norm_s = if n > 1 {L::F::one()} else {f0};
                let split = Split {
                    obj, par: &self.par,
                    op_p: SelectOp::new(n),
                    op_b: ComposeOp::<L, _, _>::new(obj.op_a, CumSumOp::new(n)),
                    synth: Some(CumSumOp::new(n)),
                };
                split.iterate(v0, sq_norm_s, monitor)?
            },
        };

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
fn test_tv_dual_prox1()
{
    use float_eq::assert_float_eq;

    // clip to [-reg, reg]
    let x = &mut[-3., -0.5, 0., 0.7, 2.];
    tv_dual_prox(x, 0.5, 1.);
    assert_float_eq!(x.as_slice(), [-1., -0.5, 0., 0.7, 1.].as_slice(), abs_all <= 1e-12);
}
