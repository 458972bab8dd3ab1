use crate::classify::{classify_language, estimate_commit_count};
use crate::github::{GithubClient, Repository};
use crate::stats::{ClassificationResult, Degradation, Stats};
use tracing::debug;

/// Everything one classification pass produces.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub results: Vec<ClassificationResult>,
    pub stats: Stats,
    pub degradations: Vec<Degradation>,
}

/// Attribute each repository to the first stack, in add order, with a nonzero share.
///
/// Strictly sequential: one outstanding request at a time. A repository's
/// commit proxy is only fetched after it matched, and the next repository is
/// not started until the current one is done. Repositories matching no stack
/// are left out of `results` and out of the per-stack counts, but
/// `stats.total_repos` still counts them.
pub async fn aggregate(
    client: &GithubClient,
    repositories: &[Repository],
    stacks: &[String],
) -> Aggregate {
    let mut out = Aggregate {
        stats: Stats::for_stacks(repositories.len() as u32, stacks),
        ..Aggregate::default()
    };

    for repo in repositories {
        for stack in stacks {
            let percentage = classify_language(client, repo, stack, &mut out.degradations).await;
            if !percentage.is_nonzero() {
                continue;
            }

            let commits = estimate_commit_count(client, repo, &mut out.degradations).await;
            debug!(repo = %repo.name, %stack, %percentage, commits, "matched");

            out.stats.record(stack, commits);
            out.results.push(ClassificationResult {
                repository: repo.clone(),
                stack: stack.clone(),
                percentage,
                commits,
            });
            break;
        }
    }

    out
}
