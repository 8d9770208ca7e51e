//! The view layer of the launcher, with utilities for styling command-line output.
use std::error::Error;

use console::style;

const MAX_WIDTH: usize = 100;

/// Format the underlying cause of an error
pub(crate) fn format_error_cause(inner: &dyn Error) -> String {
    format!(
        "{}{} {}",
        style("cause").underlined().bold(),
        style(":").bold(),
        inner,
    )
}

/// Get the width of the terminal, limited to a maximum of MAX_WIDTH
pub fn text_width() -> Option<usize> {
    // We want the stderr width, since that's where the wrapped diagnostics go
    term_size::dimensions_stderr().map(|(w, _)| w.min(MAX_WIDTH))
}
