use std::error::Error;

use super::LauncherError;
use crate::env::dev_mode;
use crate::style::format_error_cause;
use log::{debug, error};

/// Report an error, both to the console and the debug log
pub fn report_error(launcher_version: &str, err: &LauncherError) {
    error!("{}", err);

    if let Some(details) = compose_error_details(err) {
        if dev_mode() {
            eprintln!();
            eprintln!("{}", details);
        } else {
            debug!("agent-launcher v{}\n\n{}", launcher_version, details);
        }
    }
}

fn compose_error_details(err: &LauncherError) -> Option<String> {
    // Only compose details if there is an underlying cause for the error
    let mut current = err.source()?;
    let mut details = String::new();

    // Walk up the tree of causes and include all of them
    loop {
        details.push_str(&format_error_cause(current));

        match current.source() {
            Some(cause) => {
                details.push_str("\n\n");
                current = cause;
            }
            None => {
                break;
            }
        };
    }

    Some(details)
}
