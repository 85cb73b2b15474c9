//! Concrete port implementations.

pub mod csv_adapter;
pub mod csv_ledger_adapter;
pub mod file_config_adapter;
pub mod svg_chart_adapter;
