//! Convergence monitor

/// Convergence monitor trait
///
/// An iterative denoiser offers its iterate to the monitor in strict sequence,
/// once before the first iteration and once after every completed iteration,
/// and stops on the first `false`.
pub trait ConvergenceMonitor<F>
{
    /// Decides whether the iteration continues.
    ///
    /// Returns `true` to continue, `false` to stop.
    /// * `iter` is the number of completed iterations, `0` for the initial iterate.
    /// * `u` is the current iterate.
    fn should_continue(&mut self, iter: usize, u: &[F]) -> bool;
}

impl<F, M> ConvergenceMonitor<F> for M
where M: FnMut(usize, &[F]) -> bool
{
    fn should_continue(&mut self, iter: usize, u: &[F]) -> bool
    {
        self(iter, u)
    }
}
