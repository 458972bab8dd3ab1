use crate::github::{Repository, UserProfile};
use crate::session::Session;
use crate::stats::ClassificationResult;
use chrono::{DateTime, Utc};

pub const NO_DESCRIPTION: &str = "No description available";

/// Upper-case the first character, leaving the rest as typed.
pub fn stack_label(stack: &str) -> String {
    let mut chars = stack.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn card_lines(result: &ClassificationResult) -> Vec<String> {
    let repo = &result.repository;
    vec![
        repo.name.clone(),
        repo.description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        format!(
            "{} Usage: {}%",
            stack_label(&result.stack),
            result.percentage
        ),
        format!("Commits: {}", result.commits),
        repo.html_url.clone(),
    ]
}

/// Profile rows as `(label, value)` pairs; the name falls back to the login.
pub fn profile_rows(profile: &UserProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Name", profile.name.clone().unwrap_or_else(|| profile.login.clone())),
        ("Public Repos", profile.public_repos.to_string()),
        ("Followers", profile.followers.to_string()),
        ("Following", profile.following.to_string()),
        ("Avatar", profile.avatar_url.clone()),
    ]
}

/// One line per fetched repository, matched or not.
pub fn repository_line(repo: &Repository) -> String {
    format!(
        "{} ({}) - {}",
        repo.name,
        repo.html_url,
        repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
    )
}

/// Plain-text report: stack list, username and profile, one card per match,
/// the stats panel, then every fetched repository.
pub fn render_text(session: &Session, generated: DateTime<Utc>) -> String {
    let mut out = String::from("GitHub Repository Language Tracker\n");

    out.push_str(&format!("Stacks: {}\n", session.stacks().join(", ")));
    if !session.username.is_empty() {
        out.push_str(&format!("User: {}\n", session.username));
    }
    if let Some(profile) = session.profile() {
        for (label, value) in profile_rows(profile) {
            out.push_str(&format!("  {label}: {value}\n"));
        }
    }
    out.push('\n');

    for result in session.results() {
        for (i, line) in card_lines(result).iter().enumerate() {
            let indent = if i == 0 { "" } else { "  " };
            out.push_str(&format!("{indent}{line}\n"));
        }
        out.push('\n');
    }

    let stats = session.stats();
    out.push_str("Repository Stats\n");
    out.push_str(&format!("Total Repositories: {}\n", stats.total_repos));
    for s in &stats.stacks {
        out.push_str(&format!("{} Stack\n", stack_label(&s.stack)));
        out.push_str(&format!("  Repositories Count: {}\n", s.repos_count));
        out.push_str(&format!("  Total Commits: {}\n", s.total_commits));
    }

    if !session.repositories().is_empty() {
        out.push_str("\nAll Repositories\n");
        for repo in session.repositories() {
            out.push_str(&format!("  {}\n", repository_line(repo)));
        }
    }

    let degraded = session.degradations().len();
    if degraded > 0 {
        out.push_str(&format!(
            "\n{degraded} lookup(s) failed and were counted as zero\n"
        ));
    }

    out.push_str(&format!(
        "\nGenerated {}\n",
        generated.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

pub fn render_json(session: &Session, generated: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "generated": generated,
        "session": session,
    }))
}
