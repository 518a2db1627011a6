//! Core types and utilities for the imageset preparation pipeline.
//!
//! This crate provides the error type, shared domain types, and configuration
//! structures used across the imageset workspace.

pub mod cli;
pub mod config;
pub mod error;
pub mod types;

pub use cli::*;
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

/// Re-export of the most commonly used items
pub mod prelude {
    pub use crate::cli::*;
    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::types::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_exports() {
        let size = prelude::TargetSize::inception();
        assert_eq!(size.area(), 89401);
    }
}
