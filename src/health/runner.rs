//! Runs a suite of checks and tallies the results

use std::time::Instant;

use enum_map::EnumMap;
use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from one run of the suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Check name and result, in the order the checks ran
    pub results: Vec<(String, CheckResult)>,
    counts: EnumMap<CheckStatus, usize>,
}

impl HealthCheckReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.counts[status]
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warned(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned() > 0
    }

    /// Process exit code: 0 all pass, 1 any fail, 2 warnings only
    pub fn exit_code(&self) -> i32 {
        if self.failed() > 0 {
            1
        } else if self.warned() > 0 {
            2
        } else {
            0
        }
    }

    /// Result of the check called `name`
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check, _)| check == name)
            .map(|(_, result)| result)
    }
}

/// Builder for a check suite
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names and descriptions of the registered checks
    pub fn describe(&self) -> Vec<(&'static str, Option<&'static str>)> {
        self.checks
            .iter()
            .map(|check| (check.name(), check.description()))
            .collect()
    }

    pub fn run(self) -> HealthCheckReport {
        let mut results = Vec::with_capacity(self.checks.len());
        let mut counts = EnumMap::default();

        for check in self.checks {
            let name = check.name();
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            match result.status {
                CheckStatus::Fail => warn!(check = name, message = %result.message, "Check failed"),
                status => debug!(check = name, ?status, duration = ?result.duration, "Check done"),
            }

            counts[result.status] += 1;
            results.push((name.to_string(), result));
        }

        HealthCheckReport { results, counts }
    }
}
