//! Action-plan performance reports.
//!
//! Turns a flat collection of department action plans into status summaries,
//! per-strategy and per-PIC breakdowns, monthly and quarterly timelines, an
//! overdue-plan radar and a year-over-year benchmark that falls back to
//! archived statistics where live plans are missing.

pub mod benchmark;
pub mod bottleneck;
pub mod config;
pub mod dashboard;
pub mod departments;
pub mod error;
pub mod loader;
pub mod output;
pub mod period;
pub mod reports;
pub mod types;
pub mod util;

pub use error::{ReportError, Result};
