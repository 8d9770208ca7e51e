use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ExitCode;
use log::debug;

static AGENT_HAS_CONTROL: AtomicBool = AtomicBool::new(false);

/// Once the agent is running, Ctrl+C is its to handle and its exit status is what we relay
pub fn pass_control_to_agent() {
    AGENT_HAS_CONTROL.store(true, Ordering::SeqCst);
}

pub fn setup_signal_handler() {
    let result = ctrlc::set_handler(|| {
        if !AGENT_HAS_CONTROL.load(Ordering::SeqCst) {
            ExitCode::Interrupted.exit();
        }
    });

    if result.is_err() {
        debug!("Unable to set Ctrl+C handler, SIGINT will not be handled correctly");
    }
}
