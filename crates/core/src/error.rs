//! Core error types

use thiserror::Error;

/// Errors raised while constructing simulation state.
///
/// Gameplay operations themselves are total; only construction can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Arena dimensions that cannot host a game
    #[error(
        "invalid configuration: arena must be at least 1x1 and at most 32767x32767, \
         got {width}x{height}"
    )]
    InvalidConfiguration { width: usize, height: usize },
}
