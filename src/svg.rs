use crate::render::{NO_DESCRIPTION, profile_rows, stack_label};
use crate::session::Session;
use chrono::{DateTime, Utc};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 50;
const MAX_VALUE_CHARS: usize = 60;

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Long descriptions would stretch the card; cut them with an ellipsis.
fn clip(s: &str) -> String {
    if s.chars().count() <= MAX_VALUE_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX_VALUE_CHARS - 3).collect();
    out.push_str("...");
    out
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Blank,
    Stat { key: String, value: String },
    Note(String),
}

fn collect_lines(session: &Session, generated: DateTime<Utc>) -> Vec<Line> {
    let mut lines = vec![Line::Header(format!("{}@github", session.username))];
    lines.push(Line::Stat {
        key: "Stacks".to_string(),
        value: session.stacks().join(", "),
    });
    if let Some(profile) = session.profile() {
        for (label, value) in profile_rows(profile) {
            // The avatar URL is an image link, not something to print on a card.
            if label == "Avatar" {
                continue;
            }
            lines.push(Line::Stat {
                key: label.to_string(),
                value: clip(&value),
            });
        }
    }
    lines.push(Line::Blank);

    for result in session.results() {
        let repo = &result.repository;
        lines.push(Line::Header(format!("- {}", repo.name)));
        lines.push(Line::Stat {
            key: "Description".to_string(),
            value: clip(repo.description.as_deref().unwrap_or(NO_DESCRIPTION)),
        });
        lines.push(Line::Stat {
            key: format!("{} Usage", stack_label(&result.stack)),
            value: format!("{}%", result.percentage),
        });
        lines.push(Line::Stat {
            key: "Commits".to_string(),
            value: result.commits.to_string(),
        });
        lines.push(Line::Blank);
    }

    let stats = session.stats();
    lines.push(Line::Header("- Repository Stats".to_string()));
    lines.push(Line::Stat {
        key: "Total Repositories".to_string(),
        value: stats.total_repos.to_string(),
    });
    for s in &stats.stacks {
        let label = stack_label(&s.stack);
        lines.push(Line::Stat {
            key: format!("{label}.Repositories"),
            value: s.repos_count.to_string(),
        });
        lines.push(Line::Stat {
            key: format!("{label}.Commits"),
            value: s.total_commits.to_string(),
        });
    }
    lines.push(Line::Blank);
    lines.push(Line::Note(format!(
        "Generated {}",
        generated.format("%Y-%m-%d %H:%M UTC")
    )));
    lines
}

/// Render the session as a themed card.
pub fn generate_svg(session: &Session, generated: DateTime<Utc>, theme: Theme) -> String {
    let colors = theme.colors();
    let lines = collect_lines(session, generated);

    let align_width = lines
        .iter()
        .filter_map(|l| match l {
            Line::Stat { key, value } => Some(key.chars().count() + 2 + value.chars().count()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(text) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(text, align_width))
                ));
            }
            Line::Note(text) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
            Line::Stat { key, value } => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let w = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}" xml:space="preserve">
{body}
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        body = tspans
    )
}
