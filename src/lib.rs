//! Track which of a GitHub user's repositories are written in a chosen set of
//! languages, with a per-language repository count and commit tally.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod github;
pub mod render;
pub mod session;
pub mod stats;
pub mod svg;

pub use error::{TrackerError, TrackerResult};
pub use github::{ClientConfig, GithubClient, Repository};
pub use session::{Phase, Session};
