//! Query state for one user of the tracker.
//!
//! A `Session` holds the username, the ordered stack list and the outcome of
//! the last query. `fetch` borrows it mutably for the whole pipeline, so two
//! queries on the same session can never interleave their writes.

use crate::aggregate::aggregate;
use crate::github::{GithubClient, Repository, UserProfile};
use crate::stats::{ClassificationResult, Degradation, Stage, Stats};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Classifying,
    Rendered,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub username: String,
    stacks: Vec<String>,
    profile: Option<UserProfile>,
    #[serde(rename = "repositories")]
    repos: Vec<Repository>,
    results: Vec<ClassificationResult>,
    stats: Stats,
    degradations: Vec<Degradation>,
    #[serde(skip)]
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Append a stack unless it is empty or already listed. Returns whether the list changed.
    pub fn add_stack(&mut self, stack: impl Into<String>) -> bool {
        let stack = stack.into();
        if stack.is_empty() || self.stacks.contains(&stack) {
            return false;
        }
        self.stacks.push(stack);
        true
    }

    pub fn stacks(&self) -> &[String] {
        &self.stacks
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repos
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run fetch, classify and aggregate for the current username and stacks.
    /// The user's profile is fetched alongside the repository list.
    ///
    /// Does nothing and returns `false` when the username or the stack list is
    /// empty; prior results are left untouched in that case. Failures never
    /// surface here: they become empty lists, 0.00% or 0 commits, and are
    /// listed in [`Session::degradations`].
    pub async fn fetch(&mut self, client: &GithubClient) -> bool {
        if self.username.is_empty() || self.stacks.is_empty() {
            return false;
        }

        self.phase = Phase::Fetching;
        self.degradations.clear();

        self.repos = match client.list_repositories(&self.username).await {
            Ok(repos) => {
                info!(username = %self.username, count = repos.len(), "Fetched user repositories");
                repos
            }
            Err(e) => {
                warn!(username = %self.username, "Error fetching user repositories: {e}");
                self.degradations
                    .push(Degradation::new(Stage::Repositories, None, &e));
                Vec::new()
            }
        };

        self.profile = match client.user_profile(&self.username).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(username = %self.username, "Error fetching user profile: {e}");
                self.degradations
                    .push(Degradation::new(Stage::Profile, None, &e));
                None
            }
        };

        self.phase = Phase::Classifying;
        let outcome = aggregate(client, &self.repos, &self.stacks).await;
        info!(
            matched = outcome.results.len(),
            degraded = outcome.degradations.len(),
            "Classified repositories"
        );

        self.results = outcome.results;
        self.stats = outcome.stats;
        self.degradations.extend(outcome.degradations);
        self.phase = Phase::Rendered;
        true
    }
}
