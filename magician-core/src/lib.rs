//! Magician Core - reviewer rotation and assignment for the magician CI bot
//!
//! This crate decides who reviews a pull request: it tracks the reviewer
//! rotation and vacation calendars, classifies pull request authors, picks
//! a primary reviewer, and renders the comment announcing the choice.

pub mod assignment;
pub mod config;
pub mod error;
pub mod membership;
pub mod rotation;
pub mod secrets;

pub use assignment::{
    choose_reviewers, find_reviewer_comment, format_reviewer_comment, AssignmentOutcome,
    PullRequestComment, ReviewHost, ReviewerAssigner, ReviewerSelection,
};
pub use config::Config;
pub use error::{Error, Result};
pub use membership::{MembershipChecker, TrustedContributors, UserClassifier, UserType};
pub use rotation::{ReviewerConfig, ReviewerRotation, Vacation};
pub use secrets::Secrets;
