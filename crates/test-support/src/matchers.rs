use std::fmt;
use std::process::Output;

use crate::process::ProcessBuilder;

use hamcrest2::core::{MatchResult, Matcher};

/// Expectations on a finished launcher process: its status and the lines it printed
#[derive(Clone)]
pub struct Execs {
    expect_exit_code: Option<i32>,
    expect_stdout: Option<String>,
    expect_stdout_contains: Vec<String>,
    expect_stdout_not_contains: Vec<String>,
    expect_stderr_contains: Vec<String>,
}

impl Execs {
    /// Verify that stdout is exactly the given lines.
    /// See `lines_match` for supported patterns.
    pub fn with_stdout<S: ToString>(mut self, expected: S) -> Execs {
        self.expect_stdout = Some(expected.to_string());
        self
    }

    /// Verify the exit code from the process.
    pub fn with_status(mut self, expected: i32) -> Execs {
        self.expect_exit_code = Some(expected);
        self
    }

    /// Verify that stdout contains the given contiguous lines somewhere in its output.
    pub fn with_stdout_contains<S: ToString>(mut self, expected: S) -> Execs {
        self.expect_stdout_contains.push(expected.to_string());
        self
    }

    /// Verify that stdout never contains the given contiguous lines.
    ///
    /// A typo in `expected` makes this pass trivially, so pair it with a positive check.
    pub fn with_stdout_does_not_contain<S: ToString>(mut self, expected: S) -> Execs {
        self.expect_stdout_not_contains.push(expected.to_string());
        self
    }

    /// Verify that stderr contains the given contiguous lines somewhere in its output.
    pub fn with_stderr_contains<S: ToString>(mut self, expected: S) -> Execs {
        self.expect_stderr_contains.push(expected.to_string());
        self
    }

    fn match_output(&self, actual: &Output) -> MatchResult {
        let stdout = decode(&actual.stdout, "stdout")?;
        let stderr = decode(&actual.stderr, "stderr")?;
        let report = |problem: String| {
            format!(
                "{}\n--- stdout\n{}\n--- stderr\n{}",
                problem, stdout, stderr
            )
        };

        if let Some(code) = self.expect_exit_code {
            if actual.status.code() != Some(code) {
                return Err(report(format!(
                    "expected exit code {}, process {}",
                    code, actual.status
                )));
            }
        }

        if let Some(expected) = &self.expect_stdout {
            if !all_lines_match(&stdout, expected) {
                return Err(report(format!("expected stdout to be:\n{}", expected)));
            }
        }

        for expected in &self.expect_stdout_contains {
            if !contains_lines(&stdout, expected) {
                return Err(report(format!("expected stdout to contain:\n{}", expected)));
            }
        }

        for expected in &self.expect_stdout_not_contains {
            if contains_lines(&stdout, expected) {
                return Err(report(format!(
                    "expected stdout not to contain:\n{}",
                    expected
                )));
            }
        }

        for expected in &self.expect_stderr_contains {
            if !contains_lines(&stderr, expected) {
                return Err(report(format!("expected stderr to contain:\n{}", expected)));
            }
        }

        Ok(())
    }
}

// Line endings are normalized so the same expectations hold on Windows
fn decode(bytes: &[u8], stream: &str) -> Result<String, String> {
    std::str::from_utf8(bytes)
        .map(|text| text.replace('\r', ""))
        .map_err(|_| format!("{} was not utf8 encoded", stream))
}

fn all_lines_match(actual: &str, expected: &str) -> bool {
    actual.lines().count() == expected.lines().count()
        && actual
            .lines()
            .zip(expected.lines())
            .all(|(a, e)| lines_match(e, a))
}

/// Whether the expected lines appear contiguously anywhere in the actual output
fn contains_lines(actual: &str, expected: &str) -> bool {
    let actual: Vec<&str> = actual.lines().collect();
    let expected: Vec<&str> = expected.lines().collect();

    if expected.is_empty() {
        return true;
    }

    actual.windows(expected.len()).any(|window| {
        window
            .iter()
            .zip(&expected)
            .all(|(a, e)| lines_match(e, a))
    })
}

/// Compare a line with an expected pattern.
/// - Use `[..]` as a wildcard to match 0 or more characters on the same line
///   (similar to `.*` in a regex).
/// - `[ERROR]` and `[WARNING]` match the launcher's diagnostic prefixes.
pub fn lines_match(expected: &str, actual: &str) -> bool {
    // Let's not deal with / vs \ (windows...)
    let expected = substitute_macros(&expected.replace('\\', "/"));
    let mut actual: &str = &actual.replace('\\', "/");
    for (i, part) in expected.split("[..]").enumerate() {
        match actual.find(part) {
            Some(j) => {
                if i == 0 && j != 0 {
                    return false;
                }
                actual = &actual[j + part.len()..];
            }
            None => return false,
        }
    }
    actual.is_empty() || expected.ends_with("[..]")
}

fn substitute_macros(input: &str) -> String {
    input
        .replace("[ERROR]", "Launcher error:")
        .replace("[WARNING]", "Launcher warning:")
}

impl fmt::Display for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl fmt::Debug for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl Matcher<ProcessBuilder> for Execs {
    fn matches(&self, mut process: ProcessBuilder) -> MatchResult {
        self.matches(&mut process)
    }
}

impl<'a> Matcher<&'a mut ProcessBuilder> for Execs {
    fn matches(&self, process: &'a mut ProcessBuilder) -> MatchResult {
        println!("running {}", process);
        match process.exec_with_output() {
            Ok(out) => self.match_output(&out),
            Err(err) => Err(err.to_string()),
        }
    }
}

/// Expects a successful exit unless `with_status` says otherwise
pub fn execs() -> Execs {
    Execs {
        expect_exit_code: Some(0),
        expect_stdout: None,
        expect_stdout_contains: Vec::new(),
        expect_stdout_not_contains: Vec::new(),
        expect_stderr_contains: Vec::new(),
    }
}
