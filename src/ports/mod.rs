//! Port traits decoupling the domain from the outside world.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
pub mod ledger_port;
