use alloc::vec::Vec;
use num_traits::{Float, NumCast};
use core::fmt::{Debug, LowerExp};
use crate::solver::{Denoiser, Budget, TvError};
use crate::{LinAlgEx, Objective, DirectTv, ScalarMm, GroupMm, PrimalDual};

/// Closed set of denoisers
///
/// Dispatches [`Denoiser`] to the variant it holds,
/// so that a caller can select an algorithm at runtime.
pub enum AnyDenoiser<'a, L: LinAlgEx>
{
    /// Exact taut string solution.
    Direct(DirectTv<'a, L>),
    /// Majorization-minimization of the scalar penalty.
    ScalarMm(ScalarMm<'a, L>),
    /// Majorization-minimization of the overlapping group penalty.
    GroupMm(GroupMm<'a, L>),
    /// Condat-Vu primal-dual splitting.
    PrimalDual(PrimalDual<'a, L>),
}

impl<'a, L: LinAlgEx> AnyDenoiser<'a, L>
where L::F: Float + Debug + LowerExp
{
    /// Every denoiser with the parameter variations of a benchmark.
    ///
    /// Returns [`DirectTv`], [`ScalarMm`], [`GroupMm`] with group sizes `1` to `5`,
    /// and [`PrimalDual`] with `eta` in `{0.5, 1}` and `swap` in `{true, false}`.
    pub fn all() -> Vec<Self>
    {
        let mut v = Vec::new();

        v.push(AnyDenoiser::Direct(DirectTv::new()));
        v.push(AnyDenoiser::ScalarMm(ScalarMm::new()));
        for k in 1..= 5 {
            v.push(AnyDenoiser::GroupMm(GroupMm::new().par(|p| {
                p.group_size = k;
            })));
        }
        for eta in [0.5, 1.] {
            for swap in [true, false] {
                v.push(AnyDenoiser::PrimalDual(PrimalDual::new().par(|p| {
                    p.eta = <L::F as NumCast>::from(eta).unwrap();
                    p.swap = swap;
                })));
            }
        }

        v
    }

    fn inner(&self) -> &dyn Denoiser<'a, L>
    {
        match self {
            AnyDenoiser::Direct(d) => d,
            AnyDenoiser::ScalarMm(d) => d,
            AnyDenoiser::GroupMm(d) => d,
            AnyDenoiser::PrimalDual(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Denoiser<'a, L>
    {
        match self {
            AnyDenoiser::Direct(d) => d,
            AnyDenoiser::ScalarMm(d) => d,
            AnyDenoiser::GroupMm(d) => d,
            AnyDenoiser::PrimalDual(d) => d,
        }
    }
}

impl<'a, L: LinAlgEx> Denoiser<'a, L> for AnyDenoiser<'a, L>
where L::F: Float + Debug + LowerExp
{
    fn name(&self) -> &'static str
    {
        self.inner().name()
    }

    fn skip(&self, obj: &Objective<'a, L>) -> Option<&'static str>
    {
        self.inner().skip(obj)
    }

    fn configure(&mut self, obj: Objective<'a, L>) -> Result<(), TvError>
    {
        self.inner_mut().configure(obj)
    }

    fn run(&mut self, budget: Budget<'_, L::F>) -> Result<(), TvError>
    {
        self.inner_mut().run(budget)
    }

    fn result(&self) -> Result<&[L::F], TvError>
    {
        self.inner().result()
    }
}
