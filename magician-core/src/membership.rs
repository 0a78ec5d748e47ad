//! Contributor classification
//!
//! A pull request author is one of three tiers. The tier decides whether
//! presubmit tests run without approval and is shown in the reviewer comment.

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::rotation::ReviewerRotation;
use crate::Result;

/// Organizations whose members are classified as Googlers
pub const DEFAULT_MEMBER_ORGS: [&str; 2] = ["GoogleCloudPlatform", "googlers"];

/// Contributors trusted to run tests without approval who are not reviewers
const BUILTIN_TRUSTED_CONTRIBUTORS: &[&str] = &["bbasata", "jaylonmcshan03", "malhotrasagar2212"];

/// Contributor tier of a pull request author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    Community,
    Googler,
    CoreContributor,
}

impl UserType {
    /// All tiers, in the order the reviewer comment lists them
    pub fn all() -> [Self; 3] {
        [Self::Community, Self::Googler, Self::CoreContributor]
    }

    /// Label shown in the reviewer comment
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Community => "Community Contributor",
            Self::Googler => "Googler",
            Self::CoreContributor => "Core Contributor",
        }
    }

    /// Whether tests run without maintainer approval
    pub fn is_trusted(&self) -> bool {
        !matches!(self, Self::Community)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Handles with elevated trust but no place in the rotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedContributors {
    handles: BTreeSet<String>,
}

impl TrustedContributors {
    /// Create a set from handles
    pub fn new<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            handles: handles.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowlist shipped with the crate
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TRUSTED_CONTRIBUTORS.iter().copied())
    }

    /// Add more handles (builder pattern)
    pub fn with_handles<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handles.extend(handles.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, user: &str) -> bool {
        self.handles.contains(user)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Answers organization membership questions
#[async_trait]
pub trait MembershipChecker: Send + Sync {
    /// Whether `user` is a member of `org`
    async fn is_org_member(&self, user: &str, org: &str) -> Result<bool>;
}

/// Classifies users against the rotation, the trusted allowlist, and
/// organization membership
pub struct UserClassifier<'a, M: ?Sized> {
    checker: &'a M,
    rotation: &'a ReviewerRotation,
    trusted: &'a TrustedContributors,
    orgs: &'a [String],
}

impl<'a, M: MembershipChecker + ?Sized> UserClassifier<'a, M> {
    pub fn new(
        checker: &'a M,
        rotation: &'a ReviewerRotation,
        trusted: &'a TrustedContributors,
        orgs: &'a [String],
    ) -> Self {
        Self {
            checker,
            rotation,
            trusted,
            orgs,
        }
    }

    /// Classify `user`
    ///
    /// Always produces a tier: a failed membership lookup counts as "not a
    /// member".
    pub async fn classify(&self, user: &str) -> UserType {
        if self.rotation.is_core_reviewer(user) {
            info!(user, "User is a core reviewer");
            return UserType::CoreContributor;
        }

        if self.trusted.contains(user) {
            info!(user, "User is a trusted contributor");
            return UserType::CoreContributor;
        }

        for org in self.orgs {
            if self.is_member(user, org).await {
                info!(user, org = %org, "User is an organization member");
                return UserType::Googler;
            }
        }

        info!(user, "User is a community contributor");
        UserType::Community
    }

    async fn is_member(&self, user: &str, org: &str) -> bool {
        match self.checker.is_org_member(user, org).await {
            Ok(member) => {
                debug!(user, org, member, "Checked organization membership");
                member
            }
            Err(e) => {
                warn!(user, org, error = %e, "Membership check failed, treating as non-member");
                false
            }
        }
    }
}
