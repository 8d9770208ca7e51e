use crate::support::sandbox::sandbox;
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;

#[cfg(windows)]
fn agent_script(message: &str, code: i32) -> String {
    format!("@echo off\r\necho {}\r\nexit /b {}\r\n", message, code)
}

#[cfg(not(windows))]
fn agent_script(message: &str, code: i32) -> String {
    format!("#!/bin/sh\necho \"{}\"\nexit {}\n", message, code)
}

#[cfg(windows)]
const ECHO_ARGS_SCRIPT: &str = "@echo off\r\necho agent args: %*\r\n";

#[cfg(not(windows))]
const ECHO_ARGS_SCRIPT: &str = "#!/bin/sh\necho \"agent args: $@\"\n";

#[test]
fn agent_success_exits_zero() {
    let s = sandbox().agent(&agent_script("agent is working", 0)).build();

    assert_that!(
        s.launcher(),
        execs().with_status(0).with_stdout(
            "Running the coding agent...
agent is working
Agent finished successfully."
        )
    );
}

#[test]
fn agent_failure_relays_code_one() {
    let s = sandbox().agent(&agent_script("agent is working", 1)).build();

    assert_that!(
        s.launcher(),
        execs().with_status(1).with_stdout(
            "Running the coding agent...
agent is working
Agent exited with error code 1."
        )
    );
}

#[test]
fn agent_failure_relays_code_forty_two() {
    let s = sandbox().agent(&agent_script("agent is working", 42)).build();

    assert_that!(
        s.launcher(),
        execs()
            .with_status(42)
            .with_stdout_contains("Agent exited with error code 42.")
            .with_stdout_does_not_contain("Agent finished successfully.")
    );
}

#[test]
fn repeated_runs_produce_the_same_output() {
    let s = sandbox().agent(&agent_script("agent is working", 0)).build();

    let first = s.launcher().exec_with_output().unwrap();
    let second = s.launcher().exec_with_output().unwrap();

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn launcher_arguments_are_not_forwarded() {
    let s = sandbox().agent(ECHO_ARGS_SCRIPT).build();

    assert_that!(
        s.launcher().arg("--verbose").arg("extra"),
        execs()
            .with_status(0)
            .with_stdout_contains("agent args: run src.coding_agent")
            .with_stdout_does_not_contain("[..]--verbose[..]")
    );
}

#[test]
fn debug_logging_goes_to_stderr() {
    let s = sandbox()
        .agent(&agent_script("agent is working", 0))
        .env("AGENT_LAUNCHER_LOGLEVEL", "debug")
        .build();

    assert_that!(
        s.launcher(),
        execs()
            .with_status(0)
            .with_stdout(
                "Running the coding agent...
agent is working
Agent finished successfully."
            )
            .with_stderr_contains("[verbose] Agent launch running -> succeeded")
    );
}

#[cfg(unix)]
#[test]
fn agent_killed_by_signal_reports_shell_code() {
    let s = sandbox().agent("#!/bin/sh\nkill -9 $$\n").build();

    assert_that!(
        s.launcher(),
        execs()
            .with_status(137)
            .with_stdout_contains("Agent exited with error code 137.")
    );
}
