//! Code host implementation for the assignment engine

use async_trait::async_trait;
use magician_core::{MembershipChecker, ReviewHost};

use crate::GitHubClient;

#[async_trait]
impl MembershipChecker for GitHubClient {
    async fn is_org_member(&self, user: &str, org: &str) -> magician_core::Result<bool> {
        Ok(GitHubClient::is_org_member(self, user, org).await?)
    }
}

#[async_trait]
impl ReviewHost for GitHubClient {
    async fn pull_request_author(&self, pr_number: u64) -> magician_core::Result<String> {
        Ok(self.get_pr_author(pr_number).await?)
    }

    async fn requested_reviewers(&self, pr_number: u64) -> magician_core::Result<Vec<String>> {
        Ok(self.get_requested_reviewers(pr_number).await?)
    }

    async fn previous_reviewers(&self, pr_number: u64) -> magician_core::Result<Vec<String>> {
        Ok(self.get_previous_reviewers(pr_number).await?)
    }

    async fn request_reviewer(&self, pr_number: u64, reviewer: &str) -> magician_core::Result<()> {
        Ok(self
            .request_reviewers(pr_number, &[reviewer.to_string()])
            .await?)
    }

    async fn post_comment(&self, pr_number: u64, body: &str) -> magician_core::Result<()> {
        GitHubClient::post_comment(self, pr_number, body).await?;
        Ok(())
    }
}
