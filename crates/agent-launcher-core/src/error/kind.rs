use std::fmt;

use super::ExitCode;

const RUNTIME_CTA: &str =
    "Please ensure the agent runtime is installed and its environment is active
before running the launcher.";

const PERMISSIONS_CTA: &str =
    "Please ensure the agent program is executable and its interpreter is available.";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ErrorKind {
    /// Thrown when the agent program cannot be located on the PATH
    AgentNotFound { program: String },

    /// Thrown when the agent program was located but starting it failed
    AgentExecError { program: String },

    /// Thrown when the start notice could not be written, before the agent is started
    NoticeWriteError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::AgentNotFound { program } => write!(
                f,
                r#"Could not find the agent program "{}"

{}"#,
                program, RUNTIME_CTA
            ),
            ErrorKind::AgentExecError { program } => write!(
                f,
                r#"Could not start the agent program "{}"

{}"#,
                program, PERMISSIONS_CTA
            ),
            ErrorKind::NoticeWriteError => write!(
                f,
                "Could not write to standard output, the agent was not started."
            ),
        }
    }
}

impl ErrorKind {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ErrorKind::AgentNotFound { .. } => ExitCode::ExecutableNotFound,
            ErrorKind::AgentExecError { .. } => ExitCode::ExecutionFailure,
            ErrorKind::NoticeWriteError => ExitCode::UnknownError,
        }
    }
}
