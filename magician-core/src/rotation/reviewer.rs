//! Per-reviewer settings

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vacation::{RawVacation, Vacation};
use crate::{Error, Result};

/// Zone assumed when a reviewer does not set one
pub const DEFAULT_TIMEZONE: &str = "US/Pacific";

/// One reviewer's timezone and planned time off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerConfig {
    timezone: Tz,
    vacations: Vec<Vacation>,
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self::new(chrono_tz::US::Pacific)
    }
}

impl ReviewerConfig {
    /// Create a config with no vacations
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            vacations: Vec::new(),
        }
    }

    /// Add a vacation (builder pattern)
    pub fn with_vacation(mut self, vacation: Vacation) -> Self {
        self.vacations.push(vacation);
        self
    }

    /// Reviewer's timezone
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Planned vacations, in document order
    pub fn vacations(&self) -> &[Vacation] {
        &self.vacations
    }

    /// Whether any vacation covers `now`
    pub fn on_vacation(&self, now: DateTime<Utc>) -> bool {
        self.vacations
            .iter()
            .any(|vacation| vacation.covers(&self.timezone, now))
    }

    /// Build from the document form
    ///
    /// The timezone is resolved before any vacation, since vacation
    /// boundaries are local to it.
    pub(crate) fn from_raw(reviewer: &str, raw: RawReviewerConfig) -> Result<Self> {
        let name = raw
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE);

        let timezone: Tz = name.parse().map_err(|_| Error::InvalidTimezone {
            reviewer: reviewer.to_string(),
            timezone: name.to_string(),
        })?;

        let mut config = Self::new(timezone);
        for raw_vacation in &raw.vacations {
            match raw_vacation.parse(reviewer)? {
                Some(vacation) => config.vacations.push(vacation),
                None => debug!(reviewer, "Skipping placeholder vacation"),
            }
        }

        Ok(config)
    }

    /// Convert to the document form
    ///
    /// A reviewer without vacations keeps one placeholder entry so the
    /// document stays a fill-in-the-blanks template.
    pub(crate) fn to_raw(&self) -> RawReviewerConfig {
        let vacations = if self.vacations.is_empty() {
            vec![RawVacation::placeholder()]
        } else {
            self.vacations.iter().map(RawVacation::from).collect()
        };

        RawReviewerConfig {
            timezone: Some(self.timezone.name().to_string()),
            vacations,
        }
    }
}

/// Reviewer entry as written in the rotation document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawReviewerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub vacations: Vec<RawVacation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::vacation::PLACEHOLDER_DATE;
    use chrono::{NaiveDate, TimeZone};

    fn raw(yaml: &str) -> RawReviewerConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_missing_timezone_defaults_to_pacific() {
        let config = ReviewerConfig::from_raw("alice", raw("vacations: []")).unwrap();
        assert_eq!(config.timezone().name(), DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_empty_timezone_defaults_to_pacific() {
        let config = ReviewerConfig::from_raw("alice", raw("timezone: ''")).unwrap();
        assert_eq!(config.timezone(), chrono_tz::US::Pacific);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(serde_yaml::from_str::<RawReviewerConfig>("timzone: UTC").is_err());
        assert!(serde_yaml::from_str::<RawReviewerConfig>("vacation: []").is_err());
    }

    #[test]
    fn test_invalid_timezone() {
        let err = ReviewerConfig::from_raw("alice", raw("timezone: Mars/Olympus")).unwrap_err();
        match err {
            Error::InvalidTimezone { reviewer, timezone } => {
                assert_eq!(reviewer, "alice");
                assert_eq!(timezone, "Mars/Olympus");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_placeholder_vacations_dropped() {
        let config = ReviewerConfig::from_raw(
            "alice",
            raw(r#"
timezone: Asia/Kolkata
vacations:
  - start: YYYY/MM/DD
    end: YYYY/MM/DD
  - start: 2025/04/07
    end: 2025/04/11
"#),
        )
        .unwrap();

        assert_eq!(config.vacations().len(), 1);
        assert_eq!(
            config.vacations()[0].start_date(),
            NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
        );
    }

    #[test]
    fn test_to_raw_emits_placeholder_when_empty() {
        let raw = ReviewerConfig::default().to_raw();
        assert_eq!(raw.timezone.as_deref(), Some("US/Pacific"));
        assert_eq!(raw.vacations.len(), 1);
        assert_eq!(raw.vacations[0].start, PLACEHOLDER_DATE);
        assert_eq!(raw.vacations[0].end, PLACEHOLDER_DATE);
    }

    #[test]
    fn test_to_raw_keeps_real_vacations_only() {
        let vacation = Vacation::new(
            NaiveDate::from_ymd_opt(2025, 12, 22).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        )
        .unwrap();
        let raw = ReviewerConfig::default().with_vacation(vacation).to_raw();

        assert_eq!(raw.vacations.len(), 1);
        assert_eq!(raw.vacations[0].start, "2025/12/22");
        assert_eq!(raw.vacations[0].end, "2026/01/02");
    }

    #[test]
    fn test_on_vacation_uses_reviewer_zone() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        let vacation = Vacation::new(
            NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 11).unwrap(),
        )
        .unwrap();
        let config = ReviewerConfig::new(tz).with_vacation(vacation);

        // 17:00 Tokyo on the 6th is 08:00 UTC.
        let inside = Utc.with_ymd_and_hms(2025, 4, 6, 8, 0, 0).unwrap();
        // 15:00 Tokyo on the 6th is 06:00 UTC.
        let before = Utc.with_ymd_and_hms(2025, 4, 6, 6, 0, 0).unwrap();

        assert!(config.on_vacation(inside));
        assert!(!config.on_vacation(before));
        assert!(!ReviewerConfig::new(tz).on_vacation(inside));
    }
}
