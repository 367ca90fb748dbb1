//! Accumulates check results of a verification pass.

use std::{fmt, future::Future};
use tracing::{debug, warn};

/// How a single check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Succeeded,
    Failed,
    Skipped,
}

/// A recorded check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub name: String,
    pub result: String,
    pub outcome: Outcome,
}

/// Collects check results in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct TestRunner {
    checks: Vec<CheckRecord>,
    failed: usize,
    succeeded: usize,
    skipped: usize,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check.
    pub fn record(&mut self, name: impl Into<String>, result: impl Into<String>, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded => self.succeeded += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
        self.checks.push(CheckRecord { name: name.into(), result: result.into(), outcome });
    }

    /// Await `check` and record it, turning an error into a failed `"false"`.
    pub async fn run<F, E>(&mut self, name: &str, check: F)
    where
        F: Future<Output = Result<String, E>>,
        E: fmt::Display,
    {
        match check.await {
            Ok(result) => {
                debug!(check = name, %result, "check succeeded");
                self.record(name, result, Outcome::Succeeded);
            }
            Err(err) => {
                warn!(check = name, %err, "check failed");
                self.record(name, "false", Outcome::Failed);
            }
        }
    }

    /// Record `name` as skipped with result `"false"`.
    pub fn skip(&mut self, name: &str) {
        debug!(check = name, "check skipped");
        self.record(name, "false", Outcome::Skipped);
    }

    pub fn checks(&self) -> &[CheckRecord] {
        &self.checks
    }

    /// The result of the check called `name`, if it ran.
    pub fn result(&self, name: &str) -> Option<&str> {
        self.checks.iter().find(|c| c.name == name).map(|c| c.result.as_str())
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns true if no check failed.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            writeln!(f, "{}: {}", check.name, check.result)?;
        }
        write!(f, "failed: {}, succeeded: {}, skipped: {}", self.failed, self.succeeded, self.skipped)
    }
}
