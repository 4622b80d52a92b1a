//! Build information health check

use crate::build_info;
use crate::health::check::{CheckLog, CheckResult, SystemCheck};

/// Checks that vergen embedded usable build metadata
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();

        for (label, value) in [
            ("Version", build_info::PKG_VERSION),
            ("Build time", build_info::BUILD_TIMESTAMP),
            ("Target", build_info::CARGO_TARGET_TRIPLE),
            ("Opt level", build_info::CARGO_OPT_LEVEL),
            ("Rustc", build_info::RUSTC_SEMVER),
            ("Channel", build_info::RUSTC_CHANNEL),
        ] {
            if value.trim().is_empty() {
                log.warn(format!("{}: missing", label));
            } else {
                log.note(format!("{}: {}", label, value));
            }
        }

        log.finish(
            "Build metadata accessible",
            "Some build metadata is missing",
            "Build metadata unreadable",
        )
    }
}
