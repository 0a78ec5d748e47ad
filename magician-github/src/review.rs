//! Pull request reviewers and comments

use crate::{Error, GitHubClient, Result};
use magician_core::PullRequestComment;
use octocrab::models::pulls::PullRequest as OctocrabPR;
use octocrab::models::CommentId;
use tracing::{debug, info};

impl GitHubClient {
    async fn get_pull_request(&self, number: u64) -> Result<OctocrabPR> {
        debug!(number, "Fetching pull request");

        self.client()
            .pulls(self.owner(), self.repo())
            .get(number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. } if source.message.contains("Not Found") => {
                    Error::PrNotFound(number)
                }
                _ => Error::Api(e),
            })
    }

    /// Login of the pull request author
    pub async fn get_pr_author(&self, number: u64) -> Result<String> {
        let pr = self.get_pull_request(number).await?;
        pr.user
            .map(|user| user.login)
            .ok_or_else(|| Error::Other(format!("Pull request #{} has no author", number)))
    }

    /// Reviewers with a pending review request
    pub async fn get_requested_reviewers(&self, number: u64) -> Result<Vec<String>> {
        let pr = self.get_pull_request(number).await?;
        Ok(pr
            .requested_reviewers
            .unwrap_or_default()
            .into_iter()
            .map(|user| user.login)
            .collect())
    }

    /// Everyone who has submitted a review, once each, in first-review order
    ///
    /// Reviews come from the `/reviews` endpoint, not the pending requests.
    pub async fn get_previous_reviewers(&self, number: u64) -> Result<Vec<String>> {
        let page = self
            .client()
            .pulls(self.owner(), self.repo())
            .list_reviews(number)
            .send()
            .await
            .map_err(Error::Api)?;
        let reviews = self.client().all_pages(page).await.map_err(Error::Api)?;

        let reviewers = unique_in_order(
            reviews
                .into_iter()
                .filter_map(|review| review.user.map(|user| user.login)),
        );
        debug!(number, count = reviewers.len(), "Fetched previous reviewers");
        Ok(reviewers)
    }

    /// Request reviews from `reviewers`
    pub async fn request_reviewers(&self, number: u64, reviewers: &[String]) -> Result<()> {
        self.client()
            .pulls(self.owner(), self.repo())
            .request_reviews(number, reviewers.to_vec(), Vec::<String>::new())
            .await
            .map_err(Error::Api)?;

        info!(number, ?reviewers, "Requested reviewers");
        Ok(())
    }

    /// Post a comment on a pull request
    pub async fn post_comment(&self, number: u64, body: &str) -> Result<u64> {
        let comment = self
            .client()
            .issues(self.owner(), self.repo())
            .create_comment(number, body)
            .await
            .map_err(Error::Api)?;

        info!(number, comment_id = comment.id.0, "Posted comment");
        Ok(comment.id.0)
    }

    /// Replace the body of an existing comment
    pub async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        self.client()
            .issues(self.owner(), self.repo())
            .update_comment(CommentId(comment_id), body)
            .await
            .map_err(Error::Api)?;

        info!(comment_id, "Updated comment");
        Ok(())
    }

    /// All comments on a pull request
    pub async fn get_pr_comments(&self, number: u64) -> Result<Vec<PullRequestComment>> {
        let page = self
            .client()
            .issues(self.owner(), self.repo())
            .list_comments(number)
            .send()
            .await
            .map_err(Error::Api)?;
        let comments = self.client().all_pages(page).await.map_err(Error::Api)?;

        Ok(comments
            .into_iter()
            .map(|c| PullRequestComment {
                id: c.id.0,
                body: c.body.unwrap_or_default(),
                author: c.user.login,
                created_at: c.created_at,
            })
            .collect())
    }
}

/// Drop repeated logins, keeping the first occurrence
fn unique_in_order(logins: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for login in logins {
        if !unique.contains(&login) {
            unique.push(login);
        }
    }
    unique
}
