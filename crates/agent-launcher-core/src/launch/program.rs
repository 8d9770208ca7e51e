use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::command::create_command;
use crate::error::{ErrorKind, Fallible};
use log::debug;

/// The runner that hosts the coding agent
const AGENT_RUNNER: &str = "adk";

/// Module reference of the agent, as understood by the runner
const AGENT_MODULE: &[&str] = &["run", "src.coding_agent"];

/// The fixed identity of the program the launcher supervises
#[derive(Clone, Debug)]
pub struct AgentProgram {
    executable: OsString,
    module: Vec<OsString>,
}

impl AgentProgram {
    /// The coding agent, started through its runner
    pub fn agent() -> Self {
        AgentProgram::new(AGENT_RUNNER, AGENT_MODULE)
    }

    pub(crate) fn new<E, A, S>(executable: E, module: A) -> Self
    where
        E: AsRef<OsStr>,
        A: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        AgentProgram {
            executable: executable.as_ref().to_os_string(),
            module: module
                .into_iter()
                .map(|part| part.as_ref().to_os_string())
                .collect(),
        }
    }

    /// Display name of the program, used in diagnostics
    pub fn name(&self) -> String {
        self.executable.to_string_lossy().into_owned()
    }

    /// Locates the program on the PATH, failing fast if the runtime is not available
    pub fn resolve(&self) -> Fallible<ResolvedProgram> {
        let path = which::which(&self.executable).map_err(|_| ErrorKind::AgentNotFound {
            program: self.name(),
        })?;
        debug!("Resolved {} to {}", self.name(), path.display());

        Ok(ResolvedProgram {
            path,
            module: self.module.clone(),
        })
    }
}

/// An agent program whose executable has been located
#[derive(Debug)]
pub struct ResolvedProgram {
    path: PathBuf,
    module: Vec<OsString>,
}

impl ResolvedProgram {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds the child process command. Stdio is inherited from the launcher.
    pub(crate) fn command(&self) -> Command {
        let mut command = create_command(&self.path);
        command.args(&self.module);
        command
    }
}
