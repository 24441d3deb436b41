//! Recently used application state
//!
//! This crate provides:
//! - `HistoryTokenRecorder`, a bounded most-recent-first record with
//!   de-duplication by promotion
//! - `SharedRecorder` for hosts with more than one event source thread
//! - `HistoryToken`, the normalised URL-fragment state token
//! - Wiring from a broadcast state-change notifier into a recorder

pub mod feed;
pub mod recorder;
pub mod shared;
pub mod token;

// Re-exports
pub use feed::record_from;
pub use recorder::{HistoryTokenRecorder, Predicate, RecorderBuilder};
pub use shared::SharedRecorder;
pub use token::HistoryToken;
