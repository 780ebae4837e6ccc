use crate::solver::ConvergenceMonitor;

/// Iteration ceiling
///
/// Continues while the number of completed iterations is less than `max_iter`,
/// so that exactly `max_iter` iterations run unless the denoiser stops earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxIter
{
    max_iter: usize,
}

impl MaxIter
{
    /// Creates an instance.
    pub fn new(max_iter: usize) -> Self
    {
        MaxIter {max_iter}
    }
}

impl<F> ConvergenceMonitor<F> for MaxIter
{
    fn should_continue(&mut self, iter: usize, _u: &[F]) -> bool
    {
        iter < self.max_iter
    }
}

//

#[test]
fn test_maxiter1()
{
    let mut m = MaxIter::new(3);
    let u = [0_f64; 2];

    let n = (0..).take_while(|i| m.should_continue(*i, &u[..])).count();
    assert_eq!(n, 3);
}
