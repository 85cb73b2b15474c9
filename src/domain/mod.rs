//! Core domain types and logic.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod ledger;
pub mod returns;
pub mod series;
pub mod signal;
pub mod stats;
