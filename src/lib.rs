//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can all write `blockfall::core::...`.
//! The runner's environment configuration lives here as well.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
