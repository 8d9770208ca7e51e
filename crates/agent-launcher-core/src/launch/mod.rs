//! Provides the `Launcher`, which runs the agent to completion and relays its outcome.

use std::io::{self, Write};

use crate::error::{Context, ErrorKind, Fallible};
use crate::signal::pass_control_to_agent;
use log::{debug, warn};

mod program;
mod result;

pub use program::{AgentProgram, ResolvedProgram};
pub use result::{LaunchResult, LaunchState};

/// The line printed before the agent is started
pub const START_NOTICE: &str = "Running the coding agent...";

/// Runs a single agent process. A launcher is consumed by running it, so there is no re-entry.
pub struct Launcher {
    program: AgentProgram,
    state: LaunchState,
}

impl Launcher {
    pub fn new(program: AgentProgram) -> Self {
        Launcher {
            program,
            state: LaunchState::NotStarted,
        }
    }

    /// Runs the agent, writing the notices to stdout
    pub fn run(self) -> Fallible<LaunchResult> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    /// Runs the agent, writing the notices to `out`, and blocks until it has terminated.
    ///
    /// Errors are only returned when there is no agent status to relay: the program could not
    /// be located or could not be started. A failing agent is an `Ok` result.
    pub fn run_with<W: Write>(mut self, out: &mut W) -> Fallible<LaunchResult> {
        let resolved = self.program.resolve()?;
        let program = resolved.path().display().to_string();

        notify(out, START_NOTICE).with_context(|| ErrorKind::NoticeWriteError)?;

        self.transition(LaunchState::Running);
        pass_control_to_agent();

        let status = resolved
            .command()
            .status()
            .with_context(|| ErrorKind::AgentExecError { program })?;
        let result = LaunchResult::from_status(status);
        self.transition(result.state());

        // The agent has already run; its status takes precedence over a broken stdout
        if let Err(err) = notify(out, &result.outcome_notice()) {
            warn!("Could not print the agent outcome: {}", err);
        }

        Ok(result)
    }

    fn transition(&mut self, next: LaunchState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid launch transition from {} to {}",
            self.state,
            next
        );
        debug!("Agent launch {} -> {}", self.state, next);
        self.state = next;
    }
}

fn notify<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    writeln!(out, "{}", line)?;
    // The notice has to be visible before the agent writes anything
    out.flush()
}
