use crate::classify::Percentage;
use crate::error::TrackerError;
use crate::github::Repository;
use serde::Serialize;

/// One repository attributed to the first stack it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub repository: Repository,
    pub stack: String,
    pub percentage: Percentage,
    pub commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackStats {
    pub stack: String,
    pub repos_count: u32,
    pub total_commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_repos: u32,
    /// One entry per stack, in the order stacks were added.
    pub stacks: Vec<StackStats>,
}

impl Stats {
    /// Zeroed summaries for every stack.
    pub fn for_stacks(total_repos: u32, stacks: &[String]) -> Self {
        Self {
            total_repos,
            stacks: stacks
                .iter()
                .map(|s| StackStats {
                    stack: s.clone(),
                    ..StackStats::default()
                })
                .collect(),
        }
    }

    pub fn stack(&self, name: &str) -> Option<&StackStats> {
        self.stacks.iter().find(|s| s.stack == name)
    }

    pub(crate) fn record(&mut self, stack: &str, commits: u64) {
        if let Some(entry) = self.stacks.iter_mut().find(|s| s.stack == stack) {
            entry.repos_count = entry.repos_count.saturating_add(1);
            entry.total_commits = entry.total_commits.saturating_add(commits);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Repositories,
    Profile,
    Languages,
    Commits,
}

/// A failed lookup whose result was replaced by a default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub stage: Stage,
    pub repository: Option<String>,
    pub message: String,
}

impl Degradation {
    pub fn new(stage: Stage, repository: Option<&str>, err: &TrackerError) -> Self {
        Self {
            stage,
            repository: repository.map(str::to_string),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_only_touches_named_stack() {
        let stacks = vec!["Rust".to_string(), "Go".to_string()];
        let mut stats = Stats::for_stacks(3, &stacks);
        stats.record("Go", 1);
        stats.record("Go", 0);

        assert_eq!(stats.stack("Rust").unwrap().repos_count, 0);
        let go = stats.stack("Go").unwrap();
        assert_eq!(go.repos_count, 2);
        assert_eq!(go.total_commits, 1);
    }

    #[test]
    fn unknown_stack_is_ignored() {
        let mut stats = Stats::for_stacks(0, &["Rust".to_string()]);
        stats.record("Python", 1);
        assert_eq!(stats.stacks.len(), 1);
        assert_eq!(stats.stacks[0].repos_count, 0);
    }
}
