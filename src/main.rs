use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use stacktrack::github::DEFAULT_API_URL;
use stacktrack::svg::{self, Theme};
use stacktrack::{ClientConfig, GithubClient, Session, render};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stacktrack")]
#[command(about = "Estimate how much of a GitHub user's repositories use chosen languages")]
#[command(version)]
struct Cli {
    /// GitHub username to query
    username: String,

    /// Language to track (repeatable, first match wins, case-sensitive)
    #[arg(short, long = "stack")]
    stacks: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Also write dark_mode.svg and light_mode.svg into this directory
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stacktrack=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GithubClient::new(ClientConfig {
        api_url: cli.api_url,
        ..ClientConfig::default()
    })
    .context("Failed to build GitHub client")?;

    let mut session = Session::new();
    session.set_username(cli.username);
    for stack in cli.stacks {
        session.add_stack(stack);
    }

    if !session.fetch(&client).await {
        info!("Nothing to fetch: add at least one --stack");
    }

    let generated = Utc::now();
    match cli.format {
        Format::Text => print!("{}", render::render_text(&session, generated)),
        Format::Json => println!(
            "{}",
            render::render_json(&session, generated).context("Failed to serialize report")?
        ),
    }

    if let Some(dir) = cli.svg_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for theme in [Theme::Dark, Theme::Light] {
            let path = dir.join(theme.file_name());
            fs::write(&path, svg::generate_svg(&session, generated, theme))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        info!(dir = %dir.display(), "Generated dark_mode.svg and light_mode.svg");
    }

    Ok(())
}
