pub mod config;
pub mod logging;
pub mod telemetry;
pub mod tournament;
