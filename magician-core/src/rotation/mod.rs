//! Reviewer rotation module
//!
//! This module owns the pool of reviewers eligible for primary assignment,
//! their timezones, and their vacation calendars. The pool is persisted as a
//! human-editable YAML document.

pub mod pool;
pub mod reviewer;
pub mod vacation;

pub use pool::ReviewerRotation;
pub use reviewer::{ReviewerConfig, DEFAULT_TIMEZONE};
pub use vacation::{Vacation, PLACEHOLDER_DATE};
