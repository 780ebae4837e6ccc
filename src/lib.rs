#![no_std]
/*!
Solvers of 1-D total variation denoising.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate for Rust provides denoisers of the problem
\\[
{\rm minimize} \ \phi(Au - y) + \lambda \\|Du\\|\_1
\\]
for a signal \\(u \in \mathbb{R}^n\\), where \\(D\\) is the first difference and
\\(\phi\\) is a quadratic or Huber data fidelity, see [`Objective`].

# General usage

1. Choose a [`LinAlgEx`] implementation to use, [`prelude::FloatGeneric`] being the pure Rust one.
1. Construct an [`Objective`] from an observation operator \\(A\\) such as [`IdentityOp`] or [`MatBuild`],
   a regularization weight and an observation \\(y\\).
1. Create a denoiser, optionally set its parameters, and [`solver::Denoiser::configure`] it with the objective:
   * [`DirectTv`] - exact taut string algorithm, quadratic fidelity only.
   * [`ScalarMm`] - majorization-minimization, quadratic fidelity only.
   * [`GroupMm`] - majorization-minimization of overlapping group total variation, quadratic fidelity only.
   * [`PrimalDual`] - Condat-Vu primal-dual splitting, both fidelities and any \\(A\\).
1. Invoke [`solver::Denoiser::run`] with a [`solver::Budget`] and get [`solver::Denoiser::result`].

# Examples

```
use float_eq::assert_float_eq;
use totsu_tv::prelude::*;
use totsu_tv::*;

//env_logger::init(); // Use any logger crate as `totsu_tv` uses `log` crate.

type La = FloatGeneric<f64>;

let y = [0., 0., 0., 5., 5., 5., 0., 0., 0.];
let op_a = IdentityOp::new(y.len());
let obj = Objective::<La>::new(&op_a, 1., &y);

let mut direct = DirectTv::new();
direct.configure(obj.clone()).unwrap();
direct.run(Budget::Iter(1)).unwrap();

let mut pd = PrimalDual::new();
pd.configure(obj).unwrap();
pd.run(Budget::Iter(10_000)).unwrap();

assert_float_eq!(pd.result().unwrap(), direct.result().unwrap(), abs_all <= 1e-4);
```

You can find other [tests](https://github.com/convexbrain/Totsu/tree/master/solver_rust_conic/totsu_tv/tests) of the denoisers.
*/

extern crate alloc;

pub mod solver;

//

mod linalg_ex;

pub use linalg_ex::*;

//

mod floatgeneric;

pub use floatgeneric::*;

//

mod matop;
mod matbuild;
mod op_diff;
mod opnorm;

pub use matop::*;
pub use matbuild::*;
pub use op_diff::*;
pub use opnorm::*;

//

pub mod prox;

mod objective;

pub use objective::*;

//

mod direct;
mod mm;
mod group_mm;
mod primal_dual;
mod any_denoiser;

pub use direct::*;
pub use mm::*;
pub use group_mm::*;
pub use primal_dual::*;
pub use any_denoiser::*;

//

mod monitor_maxiter;
mod monitor_progress;

pub use monitor_maxiter::*;
pub use monitor_progress::*;

//

#[cfg(feature = "std")]
pub mod env;

//

/// Prelude
pub mod prelude
{
    pub use crate::solver::{Denoiser, Budget, ConvergenceMonitor, TvError, PrimalDualParam, MmParam, Formulation};
    pub use crate::{FloatGeneric, Objective, DataFit};
}
