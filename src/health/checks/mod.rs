//! Built-in checks

pub mod build_info;
pub mod config;
pub mod session;
pub mod system_info;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use session::SessionCheck;
pub use system_info::SystemInfoCheck;
