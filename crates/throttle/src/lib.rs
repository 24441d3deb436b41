//! Debounced execution of the latest submitted action
//!
//! This crate provides:
//! - `Throttler`, which coalesces bursts of submissions into one run
//! - The `TimerFacility` seam it schedules against
//! - A Tokio-backed timer and an explicitly driven manual timer

pub mod throttler;
pub mod timer;

// Re-exports
pub use throttler::{Action, Throttler};
pub use timer::{Callback, ManualHandle, ManualTimer, TimerFacility, TokioTimer};
