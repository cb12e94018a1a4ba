// Thin re-export module: implementation is in `blockchain/core.rs` to allow
// progressive decomposition of chain responsibilities (structure, traversal,
// loading).

pub mod core;
pub use core::*;
