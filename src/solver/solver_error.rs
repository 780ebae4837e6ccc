/// Denoiser errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TvError
{
    /// Size mismatch among the observation and [`crate::solver::Operator`]s.
    InvalidOp,
    /// Parameter out of its valid range.
    InvalidParam,
    /// Operator norm calculation did not converge or is not finite.
    NormFailure,
    /// The denoiser does not support the objective.
    NotApplicable,
    /// The denoiser runs before an objective is configured.
    NotConfigured,
    /// No result is available before a successful run.
    NoResult,
}

impl core::fmt::Display for TvError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            TvError::InvalidOp     => "InvalidOp: size mismatch of operator or observation",
            TvError::InvalidParam  => "InvalidParam: parameter out of range",
            TvError::NormFailure   => "NormFailure: operator norm not converged or not finite",
            TvError::NotApplicable => "NotApplicable: objective not supported by the denoiser",
            TvError::NotConfigured => "NotConfigured: run before configure",
            TvError::NoResult      => "NoResult: no result before a successful run",
        })
    }
}

//

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for TvError {}
