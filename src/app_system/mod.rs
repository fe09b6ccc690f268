//! Session wiring, startup, input dispatch and shutdown.

pub mod config;
pub mod dispatcher;
pub mod shop_system;
pub mod telemetry;

pub use config::*;
pub use dispatcher::*;
pub use shop_system::*;
pub use telemetry::*;
