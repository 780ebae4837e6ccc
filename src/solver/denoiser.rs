//! Denoiser

use crate::solver::{LinAlg, ConvergenceMonitor, TvError};
use crate::Objective;

/// Run length of [`Denoiser::run`].
pub enum Budget<'m, F>
{
    /// Fixed number of iterations.
    Iter(usize),
    /// Iterations until the monitor tells to stop.
    Monitor(&'m mut dyn ConvergenceMonitor<F>),
}

impl<'m, F> Budget<'m, F>
{
    /// Runs `step` repeatedly under this budget.
    ///
    /// The monitor sees `u` before the first step and after each step.
    /// `step` returns `Ok(false)` to finish early on its own account.
    /// Returns the number of completed steps.
    pub(crate) fn drive<S>(self, u: &mut [F], mut step: S) -> Result<usize, TvError>
    where S: FnMut(usize, &mut [F]) -> Result<bool, TvError>
    {
        let mut i = 0;
        match self {
            Budget::Iter(n_iter) => {
                while i < n_iter {
                    let more = step(i, u)?;
                    i += 1;
                    if !more {
                        break;
                    }
                }
            },
            Budget::Monitor(monitor) => {
                while monitor.should_continue(i, u) {
                    let more = step(i, u)?;
                    i += 1;
                    if !more {
                        break;
                    }
                }
            },
        }
        Ok(i)
    }
}

/// Denoiser trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Every implementor minimizes the same [`Objective`],
/// \\[
/// \phi(Au - y) + \lambda \\|Du\\|_1,
/// \\]
/// with its own algorithm.
/// The call sequence is [`Denoiser::configure`], [`Denoiser::run`] and then [`Denoiser::result`].
/// A run owns its state exclusively; nothing carries over to the next run.
pub trait Denoiser<'a, L: LinAlg>
{
    /// Name of the algorithm.
    fn name(&self) -> &'static str;

    /// Applicability check.
    ///
    /// Returns `None` if the objective can be solved, or `Some` with the reason to skip.
    fn skip(&self, obj: &Objective<'a, L>) -> Option<&'static str>;

    /// Takes an objective to be solved.
    ///
    /// Returns `Err` with [`TvError::NotApplicable`] if [`Denoiser::skip`] declines the objective,
    /// or with other [`TvError`] if the objective or parameters are invalid.
    fn configure(&mut self, obj: Objective<'a, L>) -> Result<(), TvError>;

    /// Runs the algorithm on the configured objective.
    ///
    /// * `budget` is the number of iterations or a [`ConvergenceMonitor`].
    fn run(&mut self, budget: Budget<'_, L::F>) -> Result<(), TvError>;

    /// Denoised signal of the last run.
    ///
    /// Returns `Err` with [`TvError::NoResult`] if no run has completed.
    fn result(&self) -> Result<&[L::F], TvError>;
}
