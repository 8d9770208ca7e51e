use std::fmt::{self, Display, Formatter};
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
use std::process::{exit, ExitStatus};

use crate::error::ExitCode;
use log::warn;

/// Progress of a single launch. Both outcomes are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaunchState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl LaunchState {
    /// Whether the launch may move from this state to `next`
    pub fn can_advance_to(self, next: LaunchState) -> bool {
        matches!(
            (self, next),
            (LaunchState::NotStarted, LaunchState::Running)
                | (LaunchState::Running, LaunchState::Succeeded)
                | (LaunchState::Running, LaunchState::Failed)
        )
    }
}

impl Display for LaunchState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            LaunchState::NotStarted => "not started",
            LaunchState::Running => "running",
            LaunchState::Succeeded => "succeeded",
            LaunchState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// The outcome of running the agent, observed once it has terminated
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaunchResult {
    code: i32,
}

impl LaunchResult {
    /// Captures the termination status of the agent.
    ///
    /// On Unix, an agent killed by a signal has no exit code. It is reported the way shells
    /// report it, as 128 plus the signal number.
    pub fn from_status(status: ExitStatus) -> Self {
        let code = match status.code() {
            Some(code) => code,
            None => match signal_code(&status) {
                Some(code) => {
                    warn!("The agent was terminated by a signal ({})", status);
                    code
                }
                None => ExitCode::UnknownError as i32,
            },
        };

        LaunchResult { code }
    }

    pub fn code(self) -> i32 {
        self.code
    }

    pub fn success(self) -> bool {
        self.code == 0
    }

    pub fn state(self) -> LaunchState {
        if self.success() {
            LaunchState::Succeeded
        } else {
            LaunchState::Failed
        }
    }

    /// The line printed once the agent has terminated
    pub fn outcome_notice(self) -> String {
        if self.success() {
            "Agent finished successfully.".to_string()
        } else {
            format!("Agent exited with error code {}.", self.code)
        }
    }

    /// Terminates the launcher with the agent's exit code
    pub fn exit(self) -> ! {
        if self.success() {
            ExitCode::Success.exit();
        }
        exit(self.code);
    }
}

#[cfg(unix)]
fn signal_code(status: &ExitStatus) -> Option<i32> {
    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_status: &ExitStatus) -> Option<i32> {
    None
}
