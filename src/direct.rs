use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Float, Zero};
use core::fmt::Debug;
use crate::solver::{LinAlg, Denoiser, Budget, TvError};
use crate::prox::taut_string;
use crate::{Objective, DataFit};

/// Direct denoiser by the taut string algorithm
///
/// Calculates the exact minimizer of \\(\frac12\\|u - y\\|\_2^2 + \lambda\\|Du\\|\_1\\) in a single pass, see [`taut_string`].
/// The budget of [`Denoiser::run`] is ignored.
/// Only [`DataFit::Quad`] with the identity observation is modeled; [`Objective::op_a`] is not used.
pub struct DirectTv<'a, L: LinAlg>
{
    obj: Option<Objective<'a, L>>,
    u: Option<Vec<L::F>>,
}

impl<'a, L: LinAlg> DirectTv<'a, L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        DirectTv {
            obj: None,
            u: None,
        }
    }
}

impl<'a, L: LinAlg> Default for DirectTv<'a, L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<'a, L: LinAlg> Denoiser<'a, L> for DirectTv<'a, L>
where L::F: Float + Debug
{
    fn name(&self) -> &'static str
    {
        "Direct TV"
    }

    fn skip(&self, obj: &Objective<'a, L>) -> Option<&'static str>
    {
        if obj.data_fit != DataFit::Quad {
            Some("Direct TV solver only useable for quadratic data_fit")
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

    fn run(&mut self, _budget: Budget<'_, L::F>) -> Result<(), TvError>
    {
        let obj = self.obj.as_ref().ok_or(TvError::NotConfigured)?;

        log::info!("----- {}: Started", self.name());

        let mut u = vec![L::F::zero(); obj.len()];
        if obj.reg > L::F::zero() {
            taut_string(obj.y, obj.reg, &mut u);
        }
        else {
            L::copy(obj.y, &mut u);
        }

        log::info!("----- {}: Finished", self.name());

        self.u = Some(u);
        Ok(())
    }

    fn result(&self) -> Result<&[L::F], TvError>
    {
        self.u.as_deref().ok_or(TvError::NoResult)
    }
}
