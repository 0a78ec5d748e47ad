//! The reviewer rotation
//!
//! The rotation document is the single source of truth for who reviews:
//!
//! ```yaml
//! alice:
//!   timezone: Europe/London
//!   vacations:
//!   - start: 2025/04/07
//!     end: 2025/04/11
//! bob:
//!   vacations:
//!   - start: YYYY/MM/DD
//!     end: YYYY/MM/DD
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::reviewer::{RawReviewerConfig, ReviewerConfig};
use crate::{Error, Result};

/// Rotation document shipped with the crate
const EMBEDDED_ROTATION: &str = include_str!("../../data/reviewer_rotation.yml");

/// Comment block at the top of every written rotation document
const DOCUMENT_HEADER: &str = "\
# Reviewer rotation. Each key is a GitHub handle.
# timezone defaults to US/Pacific. Vacation dates are YYYY/MM/DD, inclusive.
# Replace the placeholder entry with real dates, and add one entry per trip:
#
#   vacations:
#     - start: 2025/04/07
#       end: 2025/04/11
";

/// All reviewers eligible for assignment, keyed by GitHub handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerRotation {
    reviewers: BTreeMap<String, ReviewerConfig>,
}

impl ReviewerRotation {
    /// Create an empty rotation
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reviewer (builder pattern)
    pub fn with_reviewer(mut self, handle: impl Into<String>, config: ReviewerConfig) -> Self {
        self.reviewers.insert(handle.into(), config);
        self
    }

    /// The rotation shipped with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_ROTATION)
    }

    /// Load a rotation document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let rotation = Self::from_yaml_str(&contents)?;
        info!(path = %path.display(), reviewers = rotation.len(), "Loaded reviewer rotation");
        Ok(rotation)
    }

    /// Write the rotation document to disk
    ///
    /// The document is written next to `path` and renamed over it, so a
    /// concurrent reader sees either the old or the new rotation.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Config(format!("Not a file path: {}", path.display())))?;
        let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        std::fs::write(&tmp, self.to_yaml_string()?).map_err(Error::Io)?;
        std::fs::rename(&tmp, path).map_err(Error::Io)?;

        debug!(path = %path.display(), "Saved reviewer rotation");
        Ok(())
    }

    /// Parse a rotation document
    ///
    /// Either every entry parses or the whole document is rejected.
    pub fn from_yaml_str(doc: &str) -> Result<Self> {
        if is_blank_document(doc) {
            return Ok(Self::default());
        }

        let RawRotation(entries) = serde_yaml::from_str(doc)?;

        let mut reviewers = BTreeMap::new();
        for (handle, entry) in entries {
            let config = ReviewerConfig::from_raw(&handle, entry.unwrap_or_default())?;
            reviewers.insert(handle, config);
        }

        Ok(Self { reviewers })
    }

    /// Render the rotation document
    pub fn to_yaml_string(&self) -> Result<String> {
        let raw: BTreeMap<&str, RawReviewerConfig> = self
            .reviewers
            .iter()
            .map(|(handle, config)| (handle.as_str(), config.to_raw()))
            .collect();

        let body = serde_yaml::to_string(&raw)?;
        Ok(format!("{DOCUMENT_HEADER}{body}"))
    }

    /// Whether `user` is in the rotation
    pub fn is_core_reviewer(&self, user: &str) -> bool {
        self.reviewers.contains_key(user)
    }

    /// Settings for one reviewer
    pub fn get(&self, handle: &str) -> Option<&ReviewerConfig> {
        self.reviewers.get(handle)
    }

    /// All reviewer handles, sorted
    pub fn reviewers(&self) -> impl Iterator<Item = &str> {
        self.reviewers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }

    /// Reviewers on vacation at `now`, sorted
    pub fn on_vacation(&self, now: DateTime<Utc>) -> Vec<String> {
        self.reviewers
            .iter()
            .filter(|(_, config)| config.on_vacation(now))
            .map(|(handle, _)| handle.clone())
            .collect()
    }

    /// Reviewers that can take a review right now, sorted
    pub fn available_reviewers(&self, excluded: &[String]) -> Vec<String> {
        self.available(Utc::now(), excluded)
    }

    /// Reviewers that are neither excluded nor on vacation at `now`, sorted
    pub fn available(&self, now: DateTime<Utc>, excluded: &[String]) -> Vec<String> {
        let away = self.on_vacation(now);

        self.reviewers
            .keys()
            .filter(|handle| !excluded.contains(handle) && !away.contains(handle))
            .cloned()
            .collect()
    }

    /// Pick an available reviewer uniformly at random
    pub fn random_reviewer(&self, excluded: &[String]) -> Result<String> {
        self.random_reviewer_with(Utc::now(), excluded, &mut rand::thread_rng())
    }

    /// Pick an available reviewer at `now` using `rng`
    pub fn random_reviewer_with<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        excluded: &[String],
        rng: &mut R,
    ) -> Result<String> {
        let available = self.available(now, excluded);
        let reviewer = available
            .choose(rng)
            .cloned()
            .ok_or(Error::NoReviewerAvailable)?;

        debug!(reviewer = %reviewer, candidates = available.len(), "Picked random reviewer");
        Ok(reviewer)
    }
}

/// Reviewer entries in document order
///
/// A handle listed twice is an error rather than a silent overwrite.
struct RawRotation(Vec<(String, Option<RawReviewerConfig>)>);

impl<'de> Deserialize<'de> for RawRotation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawRotation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of reviewer handles to reviewer settings")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RawRotation, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut seen = BTreeSet::new();
                let mut entries = Vec::new();

                while let Some(handle) = map.next_key::<String>()? {
                    if !seen.insert(handle.clone()) {
                        return Err(de::Error::custom(format!(
                            "reviewer {handle} is listed more than once"
                        )));
                    }
                    entries.push((handle, map.next_value()?));
                }

                Ok(RawRotation(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn is_blank_document(doc: &str) -> bool {
    doc.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}
