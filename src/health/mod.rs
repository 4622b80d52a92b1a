//! Self-test for the chooser
//!
//! Each [`SystemCheck`] inspects one subsystem; [`HealthCheckRunner`] runs
//! them in order and the report's exit code feeds `chooser health`.
//!
//! ```no_run
//! use finger_chooser::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(SessionCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckLog, CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// The default suite, in the order `chooser health` runs it
pub fn default_runner() -> HealthCheckRunner {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::SessionCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
}

pub fn run_all_checks() -> HealthCheckReport {
    default_runner().run()
}
