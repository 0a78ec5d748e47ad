//! Magician GitHub - GitHub integration for reviewer assignment
//!
//! This crate provides the GitHub API calls the assignment engine needs:
//! pull request reviewers, review requests, comments, and organization
//! membership.

mod client;
mod error;
mod host;
mod membership;
mod review;

pub use client::GitHubClient;
pub use error::{Error, Result};
