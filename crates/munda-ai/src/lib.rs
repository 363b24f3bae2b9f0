//! Credit scoring and field insight workflows behind the Múnda AI farmer dashboard.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
