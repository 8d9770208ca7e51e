use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use test_support::{self, ok_or_panic, paths, paths::PathExt, process::ProcessBuilder};

#[cfg(windows)]
const AGENT_FILE: &str = "adk.cmd";
#[cfg(not(windows))]
const AGENT_FILE: &str = "adk";

/// Launcher environment variables that must not leak into the sandbox from the test runner
const LAUNCHER_ENV_VARS: &[&str] = &["AGENT_LAUNCHER_LOGLEVEL", "AGENT_LAUNCHER_DEV"];

pub struct EnvVar {
    name: String,
    value: String,
}

impl EnvVar {
    pub fn new(name: &str, value: &str) -> Self {
        EnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

// used to construct the fake agent runner on the sandboxed PATH
pub struct AgentBuilder {
    path: PathBuf,
    contents: String,
    executable: bool,
}

impl AgentBuilder {
    fn build(&self) {
        self.dirname().mkdir_p();

        // the file has to be closed before anything executes it
        {
            let mut file = File::create(&self.path).unwrap_or_else(|e| {
                panic!("could not create agent file {}: {}", self.path.display(), e)
            });
            ok_or_panic! { file.write_all(self.contents.as_bytes()) };
        }

        if self.executable {
            set_executable(&self.path);
        }
    }

    fn dirname(&self) -> &Path {
        self.path.parent().unwrap()
    }
}

pub struct SandboxBuilder {
    root: Sandbox,
    agent: Option<AgentBuilder>,
}

impl SandboxBuilder {
    pub fn new(root: PathBuf) -> SandboxBuilder {
        SandboxBuilder {
            root: Sandbox {
                root,
                env_vars: vec![],
            },
            agent: None,
        }
    }

    /// Place an executable agent runner with the given script body on the PATH
    pub fn agent(mut self, script: &str) -> Self {
        self.agent = Some(AgentBuilder {
            path: self.root.bin_dir().join(AGENT_FILE),
            contents: script.to_string(),
            executable: true,
        });
        self
    }

    /// Place an agent runner on the PATH that lacks execute permissions
    #[cfg(unix)]
    pub fn agent_not_executable(mut self, script: &str) -> Self {
        self.agent = Some(AgentBuilder {
            path: self.root.bin_dir().join(AGENT_FILE),
            contents: script.to_string(),
            executable: false,
        });
        self
    }

    /// Set an environment variable for the sandbox
    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.root.env_vars.push(EnvVar::new(name, value));
        self
    }

    /// Create the sandbox directories and files
    pub fn build(self) -> Sandbox {
        self.root.root().rm_rf();
        self.root.bin_dir().mkdir_p();

        if let Some(agent) = &self.agent {
            agent.build();
        }

        self.root
    }
}

pub struct Sandbox {
    root: PathBuf,
    env_vars: Vec<EnvVar>,
}

impl Sandbox {
    /// Root of the sandbox, ex: `/path/to/cargo/target/acceptance_test/t0/sandbox`
    pub fn root(&self) -> PathBuf {
        self.root.clone()
    }

    /// The only directory on the PATH seen by the launcher
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Create a `ProcessBuilder` to run a program in the sandbox.
    pub fn process<T: AsRef<OsStr>>(&self, program: T) -> ProcessBuilder {
        let mut p = test_support::process::process(program);
        p.cwd(self.root()).env("PATH", sandbox_path(&self.bin_dir()));

        for var in LAUNCHER_ENV_VARS {
            p.env_remove(var);
        }

        // overrides for env vars
        for env_var in &self.env_vars {
            p.env(&env_var.name, &env_var.value);
        }

        p
    }

    /// Create a `ProcessBuilder` to run the launcher.
    pub fn launcher(&self) -> ProcessBuilder {
        self.process(launcher_exe())
    }
}

// Generates a sandboxed environment
pub fn sandbox() -> SandboxBuilder {
    SandboxBuilder::new(paths::root().join("sandbox"))
}

fn launcher_exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agent-launcher"))
}

#[cfg(unix)]
fn sandbox_path(bin_dir: &Path) -> OsString {
    bin_dir.as_os_str().to_os_string()
}

// cmd.exe itself has to stay reachable on Windows
#[cfg(windows)]
fn sandbox_path(bin_dir: &Path) -> OsString {
    let mut path = bin_dir.as_os_str().to_os_string();
    if let Some(system_root) = std::env::var_os("SystemRoot") {
        path.push(";");
        path.push(PathBuf::from(system_root).join("System32"));
    }
    path
}

#[cfg(unix)]
fn set_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = ok_or_panic!(fs::metadata(path)).permissions();
    permissions.set_mode(0o755);
    ok_or_panic! { fs::set_permissions(path, permissions) };
}

#[cfg(windows)]
fn set_executable(_path: &Path) {}
