//! Storage and configuration boundaries.

pub mod chart_port;
pub mod clock_port;
pub mod config_port;
pub mod finance_port;
pub mod product_port;
