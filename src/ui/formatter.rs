//! Pure formatting functions for UI output.
//!
//! Standard output is reserved for the computed version, so every message
//! here goes to stderr.

use console::style;

use crate::boundary::BoundaryWarning;

/// Text of a diagnostic line, without styling.
pub fn debug_line(message: &str) -> String {
    format!("[DEBUG] {}", message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a diagnostic line in dim text.
pub fn display_debug(message: &str) {
    eprintln!("{}", style(debug_line(message)).dim());
}
