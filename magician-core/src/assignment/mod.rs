//! Reviewer assignment module
//!
//! This module decides which reviewers a pull request needs, renders the
//! comment announcing a new primary reviewer, and drives both against a
//! code host.

pub mod comment;
pub mod flow;
pub mod policy;

pub use comment::{find_reviewer_comment, format_reviewer_comment, PullRequestComment};
pub use flow::{AssignmentOutcome, ReviewHost, ReviewerAssigner};
pub use policy::{choose_reviewers, choose_reviewers_with, ReviewerSelection};
