//! Reviewer assignment comment
//!
//! The comment is rendered from an embedded Handlebars template. It is a
//! build-time asset, so a template that fails to render is a packaging bug
//! and panics rather than returning an error.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::membership::UserType;

const REVIEWER_TEMPLATE: &str = include_str!("../../templates/reviewer_assignment.md");
const TEMPLATE_NAME: &str = "reviewer_assignment";

/// A comment on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestComment {
    pub id: u64,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct TierData {
    name: &'static str,
    current: bool,
}

#[derive(Serialize)]
struct CommentData<'a> {
    reviewer: &'a str,
    tiers: Vec<TierData>,
    trusted: bool,
}

fn templates() -> &'static Handlebars<'static> {
    static TEMPLATES: OnceLock<Handlebars<'static>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(TEMPLATE_NAME, REVIEWER_TEMPLATE)
            .expect("embedded reviewer template is valid");
        handlebars
    })
}

fn reviewer_mention() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    MENTION.get_or_init(|| {
        Regex::new(r"@(?P<reviewer>[A-Za-z0-9][A-Za-z0-9-]*), a repository maintainer, has been assigned to review your changes")
            .expect("reviewer mention pattern is valid")
    })
}

/// Render the comment announcing `reviewer` as primary reviewer
///
/// The author's tier is shown plainly and the other tiers struck through.
pub fn format_reviewer_comment(reviewer: &str, author_type: UserType, trusted: bool) -> String {
    let data = CommentData {
        reviewer,
        tiers: UserType::all()
            .into_iter()
            .map(|tier| TierData {
                name: tier.display_name(),
                current: tier == author_type,
            })
            .collect(),
        trusted,
    };

    templates()
        .render(TEMPLATE_NAME, &data)
        .expect("embedded reviewer template renders")
}

/// Find the most recent reviewer assignment comment
///
/// Returns the comment and the reviewer it names.
pub fn find_reviewer_comment(
    comments: &[PullRequestComment],
) -> Option<(&PullRequestComment, String)> {
    let found = comments
        .iter()
        .filter_map(|comment| {
            reviewer_mention()
                .captures(&comment.body)
                .map(|caps| (comment, caps["reviewer"].to_string()))
        })
        .max_by_key(|(comment, _)| comment.created_at);

    if let Some((comment, reviewer)) = &found {
        debug!(comment_id = comment.id, reviewer = %reviewer, "Found reviewer comment");
    }
    found
}
