//! Reviewer selection for a pull request

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::rotation::ReviewerRotation;
use crate::Result;

/// Reviewers to request on a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerSelection {
    /// Reviewers to (re-)request, in order
    pub to_request: Vec<String>,
    /// Newly drawn primary reviewer, if the pull request needed one
    pub new_primary: Option<String>,
}

/// Decide which reviewers to request
///
/// * `first_requested` - the pull request's current primary reviewer, if any
/// * `previously_involved` - reviewers who already reviewed the pull request
///
/// Previously involved rotation members are re-requested, since GitHub
/// drops a reviewer from the requested list once they submit a review.
/// Anyone outside the rotation is ignored. A new primary is drawn only when
/// neither input supplies one.
pub fn choose_reviewers(
    rotation: &ReviewerRotation,
    first_requested: Option<&str>,
    previously_involved: &[String],
) -> Result<ReviewerSelection> {
    choose_reviewers_with(
        rotation,
        first_requested,
        previously_involved,
        Utc::now(),
        &mut rand::thread_rng(),
    )
}

/// [`choose_reviewers`] with an explicit clock and random source
pub fn choose_reviewers_with<R: Rng + ?Sized>(
    rotation: &ReviewerRotation,
    first_requested: Option<&str>,
    previously_involved: &[String],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ReviewerSelection> {
    let mut has_primary = first_requested.is_some_and(|reviewer| !reviewer.is_empty());
    let mut to_request: Vec<String> = Vec::new();

    for reviewer in previously_involved {
        if !rotation.is_core_reviewer(reviewer) {
            debug!(reviewer = %reviewer, "Ignoring previous reviewer outside the rotation");
            continue;
        }
        has_primary = true;
        if !to_request.contains(reviewer) {
            to_request.push(reviewer.clone());
        }
    }

    let new_primary = if has_primary {
        None
    } else {
        let primary = rotation.random_reviewer_with(now, &[], rng)?;
        info!(reviewer = %primary, "Assigned new primary reviewer");
        to_request.push(primary.clone());
        Some(primary)
    };

    Ok(ReviewerSelection {
        to_request,
        new_primary,
    })
}
