//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod invocation;
pub mod telemetry;
pub mod user_system;

pub use config::*;
pub use invocation::*;
pub use telemetry::*;
pub use user_system::*;
