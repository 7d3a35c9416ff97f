//! # WMS Shared
//! 
//! Configuration, telemetry, and constants shared by the warehouse utilization crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
