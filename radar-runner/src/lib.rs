//! Radar Runner: refresh orchestration for the market dashboard.
//!
//! - Configuration (TOML plus environment overrides)
//! - Settle-all fan-out over the best-effort sources
//! - AggregationController publishing `DashboardSnapshot` views
//! - Periodic refresh loop and tracing setup

pub mod config;
pub mod controller;
pub mod fanout;
pub mod refresh_loop;
pub mod snapshot;
pub mod telemetry;

pub use config::{ConfigError, RadarConfig, SourceConfig};
pub use controller::AggregationController;
pub use refresh_loop::spawn_refresh_loop;
pub use snapshot::{DashboardSnapshot, SlotState};
