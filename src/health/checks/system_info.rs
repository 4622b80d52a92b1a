//! Host system health check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

/// Gathers OS, CPU and memory details for bug reports
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reports the host OS, CPU cores and memory")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let unknown = || "unknown".to_string();
        let mut details = vec![
            format!(
                "  OS: {} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            format!("  Kernel: {}", System::kernel_version().unwrap_or_else(unknown)),
        ];

        let logical_cores = sys.cpus().len();
        if logical_cores == 0 {
            return CheckResult::warn("Unable to detect CPU cores")
                .with_details(details.join("\n"));
        }
        details.push(format!(
            "  CPU cores: {} physical, {} logical",
            System::physical_core_count().unwrap_or(0),
            logical_cores
        ));

        let total_memory_mb = sys.total_memory() / (1024 * 1024);
        details.push(format!("  Memory: {} MB total", total_memory_mb));

        if total_memory_mb < 64 {
            return CheckResult::warn("Low memory detected").with_details(details.join("\n"));
        }

        CheckResult::pass(format!("{} cores, {} MB", logical_cores, total_memory_mb))
            .with_details(details.join("\n"))
    }
}
