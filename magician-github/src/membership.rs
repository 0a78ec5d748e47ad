//! Organization membership checks

use crate::{Error, GitHubClient, Result};
use tracing::debug;

impl GitHubClient {
    /// Whether `user` is a member of `org`
    ///
    /// Private membership is only visible to tokens with `read:org` on `org`.
    pub async fn is_org_member(&self, user: &str, org: &str) -> Result<bool> {
        let member = self
            .client()
            .orgs(org)
            .check_membership(user)
            .await
            .map_err(Error::Api)?;

        debug!(user, org, member, "Checked organization membership");
        Ok(member)
    }
}
