use num_traits::Float;
use core::fmt::LowerExp;
use crate::solver::ConvergenceMonitor;

/// Sufficient progress criterion
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Evaluates an objective \\(f\\) on every offered iterate and keeps the best value \\(f\_{\rm best}\\).
/// An iterate whose improvement \\((f\_{\rm best} - f(u)) / |f(u\_0)|\\) is less than `eps`
/// counts up the patience, any other resets it.
/// The iteration stops when the patience is exhausted, when `max_iter` iterations have completed,
/// or when the objective is not finite.
pub struct SufficientProgress<F, E>
where F: Float, E: FnMut(&[F]) -> F
{
    objective: E,
    eps: F,
    patience: usize,
    max_iter: usize,

    scale: F,
    best: Option<F>,
    count: usize,
}

impl<F, E> SufficientProgress<F, E>
where F: Float, E: FnMut(&[F]) -> F
{
    /// Creates an instance.
    ///
    /// Returns the [`SufficientProgress`] instance with `eps = 1e-10`, `patience = 30` and no iteration ceiling.
    /// * `objective` evaluates the objective value of an iterate, typically by [`crate::Objective::value`].
    pub fn new(objective: E) -> Self
    {
        let ten = F::from(10).unwrap();

        SufficientProgress {
            objective,
            eps: ten.powi(-10),
            patience: 30,
            max_iter: usize::MAX,
            scale: F::one(),
            best: None,
            count: 0,
        }
    }

    /// Builder pattern of the relative improvement tolerance.
    pub fn eps(mut self, eps: F) -> Self
    {
        self.eps = eps;
        self
    }

    /// Builder pattern of the number of insufficient iterates to tolerate.
    pub fn patience(mut self, patience: usize) -> Self
    {
        self.patience = patience;
        self
    }

    /// Builder pattern of the iteration ceiling.
    pub fn max_iter(mut self, max_iter: usize) -> Self
    {
        self.max_iter = max_iter;
        self
    }

    /// Best objective value seen so far.
    pub fn best(&self) -> Option<F>
    {
        self.best
    }
}

impl<F, E> ConvergenceMonitor<F> for SufficientProgress<F, E>
where F: Float + LowerExp, E: FnMut(&[F]) -> F
{
    fn should_continue(&mut self, iter: usize, u: &[F]) -> bool
    {
        if iter >= self.max_iter {
            log::debug!("{}: max_iter reached", iter);
            return false;
        }

        let value = (self.objective)(u);
        if !value.is_finite() {
            log::warn!("{}: objective is not finite", iter);
            return false;
        }

        let best = match self.best {
            None => {
                // first iterate
                self.scale = if value.abs() > F::zero() {value.abs()} else {F::one()};
                self.best = Some(value);
                self.count = 0;
                return true;
            },
            Some(b) => b,
        };

        let progress = (best - value) / self.scale;
        if progress < self.eps {
            self.count += 1;
        }
        else {
            self.best = Some(value);
            self.count = 0;
        }

        log::trace!("{}: objective {:.6e}, patience {}/{}", iter, value, self.count, self.patience);
        if self.count >= self.patience {
            log::debug!("{}: insufficient progress over {} iterates", iter, self.patience);
            false
        }
        else {
            true
        }
    }
}

//

#[test]
fn test_progress_stall()
{
    // objective stalls after the third iterate
    let values = [10., 5., 4., 4., 4., 4., 4., 4.];
    let mut m = SufficientProgress::new(|u: &[f64]| u[0]).patience(3);

    let n = (0..values.len())
        .take_while(|i| m.should_continue(*i, &values[*i..= *i]))
        .count();
    // iterates 3, 4 and 5 exhaust the patience
    assert_eq!(n, 5);
    assert_eq!(m.best(), Some(4.));
}

#[test]
fn test_progress_max_iter()
{
    let mut m = SufficientProgress::new(|u: &[f64]| -u[0]).max_iter(4);

    let n = (0..100)
        .take_while(|i| m.should_continue(*i, &[*i as f64][..]))
        .count();
    assert_eq!(n, 4);
}
