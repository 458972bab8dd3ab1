//! Stack classification for a single repository.
//!
//! Both lookups degrade to a default on failure: a language fetch that fails
//! reads as 0.00%, a commit fetch that fails reads as 0 commits. Every such
//! failure is logged and pushed onto the caller's degradation list.

use crate::github::{GithubClient, LanguageBytes, Repository};
use crate::stats::{Degradation, Stage};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Share of a repository's bytes attributed to one language, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.0);

    /// Round `raw` to two decimals. Non-finite input collapses to zero.
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::ZERO;
        }
        Percentage((raw * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the rounded value is above zero. A stack with a sliver of
    /// bytes that rounds to 0.00 does not match.
    pub fn is_nonzero(self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Percentage of `languages` bytes written in `stack`. An empty map is 0.00.
pub fn stack_percentage(languages: &LanguageBytes, stack: &str) -> Percentage {
    let total: u64 = languages.values().copied().fold(0u64, u64::saturating_add);
    if total == 0 {
        return Percentage::ZERO;
    }
    let stack_bytes = languages.get(stack).copied().unwrap_or(0);
    Percentage::from_raw(stack_bytes as f64 / total as f64 * 100.0)
}

pub async fn classify_language(
    client: &GithubClient,
    repo: &Repository,
    stack: &str,
    degradations: &mut Vec<Degradation>,
) -> Percentage {
    match client.languages(repo).await {
        Ok(languages) => stack_percentage(&languages, stack),
        Err(e) => {
            warn!(repo = %repo.name, %stack, "Error fetching languages: {e}");
            degradations.push(Degradation::new(Stage::Languages, Some(repo.name.as_str()), &e));
            Percentage::ZERO
        }
    }
}

/// Commit-count proxy: the length of a one-item commit page (0 or 1).
pub async fn estimate_commit_count(
    client: &GithubClient,
    repo: &Repository,
    degradations: &mut Vec<Degradation>,
) -> u64 {
    match client.commit_page_len(repo).await {
        Ok(n) => n,
        Err(e) => {
            warn!(repo = %repo.name, "Error fetching commits: {e}");
            degradations.push(Degradation::new(Stage::Commits, Some(repo.name.as_str()), &e));
            0
        }
    }
}
