//! Denoiser traits, parameters and errors

mod linalg;
mod operator;
mod monitor;
mod denoiser;
mod param;
mod solver_error;

pub use linalg::*;
pub use operator::*;
pub use monitor::*;
pub use denoiser::*;
pub use param::*;
pub use solver_error::*;
