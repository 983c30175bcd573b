//! Terminal input module.
//!
//! Maps `crossterm` key events onto the five simulation commands. Keys with no
//! mapping produce nothing and are simply dropped by the caller.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
