// core.rs splits responsibilities into submodules for easier maintenance.
pub mod chain;

pub use chain::*;
