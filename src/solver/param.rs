use num_traits::Float;

/// Coupling of the total variation penalty in [`crate::PrimalDual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formulation
{
    /// The penalty acts on the differences \\(Du\\) of the signal itself.
    Analysis,
    /// The signal is synthesized as \\(u = Lz\\) by cumulative sums
    /// and the penalty acts on the increments \\(z_1, \ldots, z_{n-1}\\).
    Synthesis,
}

/// Parameters of [`crate::PrimalDual`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimalDualParam<F: Float>
{
    /// Relaxation factor in \\((0, 2)\\).
    pub eta: F,
    /// Updates the primal variable first if `true`, the dual variable first otherwise.
    pub swap: bool,
    /// Dual step size.
    pub sigma: F,
    /// Analysis or synthesis coupling.
    pub formulation: Formulation,
    /// Tolerance of off-diagonal elements in the eigenvalue calculation of operator norms.
    pub eps_eig: F,
    /// Max sweep number of the eigenvalue calculation of operator norms.
    pub max_eig_sweep: usize,
    /// Period of iterations to output progress log (for debug level).
    pub log_period: usize,
}

impl<F: Float> Default for PrimalDualParam<F>
{
    fn default() -> Self
    {
        let ten = F::from(10).unwrap();
        let half = F::from(0.5).unwrap();

        PrimalDualParam {
            eta: F::one(),
            swap: false,
            sigma: half,
            formulation: Formulation::Analysis,
            eps_eig: ten.powi(-12),
            max_eig_sweep: 100,
            log_period: 1_000,
        }
    }
}

/// Parameters of [`crate::ScalarMm`] and [`crate::GroupMm`].
#[derive(Debug, Clone, PartialEq)]
pub struct MmParam<F: Float>
{
    /// Number of consecutive differences in an overlapping group.
    /// [`crate::ScalarMm`] ignores this and uses `1`.
    pub group_size: usize,
    /// Tolerance of relative change of the iterate for early exit. Non-positive disables early exit.
    /// [`crate::ScalarMm`] ignores this.
    pub tol: F,
    /// Period of iterations to output progress log (for debug level).
    pub log_period: usize,
}

impl<F: Float> Default for MmParam<F>
{
    fn default() -> Self
    {
        let ten = F::from(10).unwrap();

        MmParam {
            group_size: 1,
            tol: ten.powi(-8),
            log_period: 100,
        }
    }
}
