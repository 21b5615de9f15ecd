//! pollbooth - local-first polls.
//!
//! Create polls, record one vote per user per poll via persisted local
//! state, aggregate counts into totals and percentages, render a donut
//! chart, and keep a light/dark theme preference. Everything runs in a
//! single synchronous execution context against whole-value key/value
//! storage.

pub mod chart;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;
pub mod theme;
pub mod toast;
pub mod voting;

pub use error::{Error, Result};
pub use models::Poll;
pub use store::{FileStorage, MemoryStorage, PollStore, Storage};
pub use theme::{Mode, ThemeManager};
pub use toast::{Toast, ToastQueue};
pub use voting::{OptionTally, PollResults, calculate_results};
