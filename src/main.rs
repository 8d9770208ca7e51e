use agent_launcher_core::error::report_error;
use agent_launcher_core::launch::{AgentProgram, Launcher};
use agent_launcher_core::log::Logger;
use agent_launcher_core::signal::setup_signal_handler;
use log::debug;

/// The entry point for the `agent-launcher` executable.
pub fn main() {
    Logger::init().expect("Only a single Logger should be initialized");
    setup_signal_handler();

    debug!("agent-launcher v{}", env!("CARGO_PKG_VERSION"));

    match Launcher::new(AgentProgram::agent()).run() {
        Ok(result) => result.exit(),
        Err(err) => {
            report_error(env!("CARGO_PKG_VERSION"), &err);
            err.exit_code().exit();
        }
    }
}
