//! Health check trait and result types

use std::time::Duration;

use colored::Colorize;
use enum_map::Enum;

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum CheckStatus {
    Pass,
    /// Usable, but something looked off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Pass or Warn
    pub fn is_ok(&self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    pub fn as_colored_str(&self) -> String {
        match self {
            CheckStatus::Pass => self.label().green().to_string(),
            CheckStatus::Warn => self.label().yellow().to_string(),
            CheckStatus::Fail => self.label().red().to_string(),
        }
    }
}

/// What a check found
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
    /// Multi-line notes printed below the summary table
    pub details: Option<String>,
    pub duration: Duration,
}

impl CheckResult {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// A self-contained check of one subsystem
pub trait SystemCheck {
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    /// What this check validates, for `--verbose` listings
    fn description(&self) -> Option<&'static str> {
        None
    }
}

/// Collects detail lines and the worst status seen while a check runs
#[derive(Debug, Default)]
pub struct CheckLog {
    lines: Vec<String>,
    warned: bool,
    failed: bool,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("  ✓ {}", line.as_ref()));
    }

    pub fn warn(&mut self, line: impl AsRef<str>) {
        self.warned = true;
        self.lines.push(format!("  ⚠ {}", line.as_ref()));
    }

    pub fn fail(&mut self, line: impl AsRef<str>) {
        self.failed = true;
        self.lines.push(format!("  ✗ {}", line.as_ref()));
    }

    /// Plain informational line
    pub fn note(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("  {}", line.as_ref()));
    }

    /// Picks the message matching the worst status recorded
    pub fn finish(self, pass: &str, warn: &str, fail: &str) -> CheckResult {
        let result = if self.failed {
            CheckResult::fail(fail)
        } else if self.warned {
            CheckResult::warn(warn)
        } else {
            CheckResult::pass(pass)
        };
        result.with_details(self.lines.join("\n"))
    }
}
