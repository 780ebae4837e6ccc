//! Parameter overrides by environment variables

extern crate std;

use num_traits::{Num, Float};
use core::fmt::Display;
use crate::solver::{PrimalDualParam, MmParam};

/// Parses an environment variable as a number.
///
/// Returns `Some` with the parsed value, logging it, or `None` if the variable is unset or malformed.
pub fn num_by_env<N: Num + Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(s.trim(), 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

/// Parses an environment variable as a boolean, accepting `true`/`false` and `1`/`0`.
pub fn bool_by_env(e: &str) -> Option<bool>
{
    let v = std::env::var(e).ok().and_then(|s| {
        match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    });
    if let Some(b) = v {
        log::info!("{}: {}", e, b);
    }
    v
}

/// Overrides [`PrimalDualParam`] by `TV_ETA`, `TV_SWAP`, `TV_SIGMA` and `TV_LOG_PERIOD`.
pub fn set_pd_par_by_env<F: Float + Display>(p: &mut PrimalDualParam<F>)
{
    p.eta = num_by_env("TV_ETA").unwrap_or(p.eta);
    p.swap = bool_by_env("TV_SWAP").unwrap_or(p.swap);
    p.sigma = num_by_env("TV_SIGMA").unwrap_or(p.sigma);
    p.log_period = num_by_env("TV_LOG_PERIOD").unwrap_or(p.log_period);
}

/// Overrides [`MmParam`] by `TV_GROUP_SIZE`, `TV_TOL` and `TV_LOG_PERIOD`.
pub fn set_mm_par_by_env<F: Float + Display>(p: &mut MmParam<F>)
{
    p.group_size = num_by_env("TV_GROUP_SIZE").unwrap_or(p.group_size);
    p.tol = num_by_env("TV_TOL").unwrap_or(p.tol);
    p.log_period = num_by_env("TV_LOG_PERIOD").unwrap_or(p.log_period);
}

//

#[test]
fn test_env_override()
{
    // variable names unique to this test
    std::env::set_var("TV_TEST_NUM", "0.25");
    std::env::set_var("TV_TEST_BOOL", "1");
    std::env::set_var("TV_TEST_BAD", "x");

    assert_eq!(num_by_env::<f64>("TV_TEST_NUM"), Some(0.25));
    assert_eq!(num_by_env::<usize>("TV_TEST_BAD"), None);
    assert_eq!(num_by_env::<usize>("TV_TEST_UNSET"), None);
    assert_eq!(bool_by_env("TV_TEST_BOOL"), Some(true));
    assert_eq!(bool_by_env("TV_TEST_BAD"), None);

    let mut p = PrimalDualParam::<f64>::default();
    set_pd_par_by_env(&mut p);
    assert_eq!(p, PrimalDualParam::default());
}
