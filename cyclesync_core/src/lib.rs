#![forbid(unsafe_code)]

//! Core domain model and business logic for the CycleSync tracker.
//!
//! This crate provides:
//! - Domain types (cycles, contraceptive methods, activity logs, foods)
//! - Cycle length and fertile-window computation
//! - Contraceptive renewal scheduling and overuse detection
//! - Pregnancy-risk evaluation
//! - Key-value persistence and the application-state container

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod cycle;
pub mod scheduler;
pub mod advisor;
pub mod store;
pub mod state;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, Guide};
pub use config::Config;
pub use cycle::{compute_cycle, cycle_stats, day_in_cycle, CycleStats};
pub use scheduler::{
    ec_overuse_warning, ec_uses_this_year, renewal_reminders, schedule_method,
    EC_OVERUSE_THRESHOLD, RENEWAL_LEAD_DAYS,
};
pub use advisor::{evaluate_risk, has_active_contraception, is_fertile_day};
pub use store::{JsonFileStore, KvStore};
pub use state::AppState;
pub use export::export_cycles_csv;
