//! Concrete adapter implementations for ports.

pub mod console_table;
pub mod csv_adapter;
pub mod date_file_adapter;
pub mod file_config_adapter;
pub mod svg_chart;
