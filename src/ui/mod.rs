//! User interface module - diagnostics and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The verbosity-aware [Reporter] threaded through a run

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    debug_line, display_boundary_warning, display_debug, display_error, display_status,
};

use crate::boundary::BoundaryWarning;

/// Diagnostic sink for one run.
///
/// Verbosity is decided once from the command line and carried by value into
/// every component that reports progress. Debug lines are dropped unless
/// verbose; warnings are always shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Reporter { verbose }
    }

    /// A reporter that never prints debug lines
    pub fn quiet() -> Self {
        Reporter { verbose: false }
    }

    /// Print a `[DEBUG]` line to stderr when verbose.
    pub fn debug(&self, message: impl AsRef<str>) {
        if self.verbose {
            display_debug(message.as_ref());
        }
    }

    /// Print a non-fatal warning to stderr.
    pub fn warn(&self, warning: &BoundaryWarning) {
        display_boundary_warning(warning);
    }
}
