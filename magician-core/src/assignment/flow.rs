//! Pull request reviewer assignment
//!
//! Ties classification, reviewer selection, and the comment together over a
//! code host. The host is only mutated once every decision has been made and
//! the comment rendered.

use async_trait::async_trait;
use tracing::info;

use super::comment::format_reviewer_comment;
use super::policy::{choose_reviewers, ReviewerSelection};
use crate::membership::{MembershipChecker, TrustedContributors, UserClassifier, UserType};
use crate::rotation::ReviewerRotation;
use crate::Result;

/// Pull request operations needed to assign reviewers
///
/// Errors from these calls are passed through unchanged.
#[async_trait]
pub trait ReviewHost: MembershipChecker {
    /// Login of the pull request author
    async fn pull_request_author(&self, pr_number: u64) -> Result<String>;

    /// Reviewers with a pending review request, in GitHub's order
    async fn requested_reviewers(&self, pr_number: u64) -> Result<Vec<String>>;

    /// Reviewers who have submitted a review, in first-review order
    async fn previous_reviewers(&self, pr_number: u64) -> Result<Vec<String>>;

    /// Request a review from `reviewer`
    async fn request_reviewer(&self, pr_number: u64, reviewer: &str) -> Result<()>;

    /// Post a comment on the pull request
    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<()>;
}

/// What happened to a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    pub author: String,
    pub user_type: UserType,
    /// Whether tests run without approval
    pub trusted: bool,
    /// Reviewers requested on the pull request
    pub requested: Vec<String>,
    pub new_primary: Option<String>,
    /// Comment posted for a new primary reviewer
    pub comment: Option<String>,
}

/// Assigns reviewers to pull requests
pub struct ReviewerAssigner<'a, H: ?Sized> {
    host: &'a H,
    rotation: &'a ReviewerRotation,
    trusted: &'a TrustedContributors,
    orgs: &'a [String],
}

impl<'a, H: ReviewHost + ?Sized> ReviewerAssigner<'a, H> {
    pub fn new(
        host: &'a H,
        rotation: &'a ReviewerRotation,
        trusted: &'a TrustedContributors,
        orgs: &'a [String],
    ) -> Self {
        Self {
            host,
            rotation,
            trusted,
            orgs,
        }
    }

    /// Classify the author and request reviews on `pr_number`
    ///
    /// Core contributors review each other's changes directly, so their pull
    /// requests get no automatic assignment.
    pub async fn assign(&self, pr_number: u64) -> Result<AssignmentOutcome> {
        let author = self.host.pull_request_author(pr_number).await?;
        let user_type = UserClassifier::new(self.host, self.rotation, self.trusted, self.orgs)
            .classify(&author)
            .await;
        let trusted = user_type.is_trusted();

        if user_type == UserType::CoreContributor {
            info!(pr_number, author = %author, "Author is a core contributor, not assigning reviewers");
            return Ok(AssignmentOutcome {
                author,
                user_type,
                trusted,
                requested: Vec::new(),
                new_primary: None,
                comment: None,
            });
        }

        // Only a rotation member counts as the primary reviewer.
        let requested = self.host.requested_reviewers(pr_number).await?;
        let first_requested = requested
            .iter()
            .find(|reviewer| self.rotation.is_core_reviewer(reviewer))
            .map(String::as_str);

        let previous = self.host.previous_reviewers(pr_number).await?;
        let ReviewerSelection {
            to_request,
            new_primary,
        } = choose_reviewers(self.rotation, first_requested, &previous)?;

        let comment = new_primary
            .as_deref()
            .map(|primary| format_reviewer_comment(primary, user_type, trusted));

        for reviewer in &to_request {
            self.host.request_reviewer(pr_number, reviewer).await?;
        }
        if let Some(body) = &comment {
            self.host.post_comment(pr_number, body).await?;
        }

        info!(
            pr_number,
            author = %author,
            user_type = %user_type,
            requested = ?to_request,
            new_primary = ?new_primary,
            "Assigned reviewers"
        );

        Ok(AssignmentOutcome {
            author,
            user_type,
            trusted,
            requested: to_request,
            new_primary,
            comment,
        })
    }
}
