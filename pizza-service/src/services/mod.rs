//! Services module for pizza-service.

pub mod database;
pub mod metrics;

pub use database::{Database, Session};
pub use metrics::{get_metrics, init_metrics, record_error};
