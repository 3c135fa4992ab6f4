//! Timing source adapters
//!
//! Each adapter turns one kind of history into a [`TimingSnapshot`]. A source
//! with no history is an empty snapshot, not an error; a source that cannot
//! be reached or parsed is a [`SplitError::SourceUnavailable`].
//!
//! [`SplitError::SourceUnavailable`]: crate::error::SplitError::SourceUnavailable

pub mod circleci;
pub mod junit;
pub mod line_count;

use crate::error::Result;
use crate::timing::{FileSet, TimingSnapshot};
use std::fmt;
use tracing::info;

/// Connection settings for the CircleCI v1.1 API
#[derive(Clone, PartialEq, Eq)]
pub struct CircleCiSettings {
    /// Project slug, e.g. `github/acme/shop`
    pub project: String,
    /// Branch whose latest successful build supplies timings
    pub branch: String,
    /// API token
    pub token: String,
}

impl fmt::Debug for CircleCiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircleCiSettings")
            .field("project", &self.project)
            .field("branch", &self.branch)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Where per-file durations come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimingSource {
    /// No history: every file weighs the same
    #[default]
    Uniform,
    /// Line count of each file as a duration proxy
    LineCount,
    /// JUnit XML reports matching a glob, or a single report on stdin
    JUnit { path: Option<String> },
    /// Test results of the latest successful CircleCI build
    CircleCi(CircleCiSettings),
}

impl TimingSource {
    /// True when durations come from real test runs
    ///
    /// Only authoritative sources report files without history and the
    /// expected container time.
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Self::JUnit { .. } | Self::CircleCi(_))
    }

    /// Short name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::LineCount => "line-count",
            Self::JUnit { .. } => "junit",
            Self::CircleCi(_) => "circleci",
        }
    }

    /// Load raw timings for `files`
    ///
    /// Only the line-count source looks at `files`; the others return
    /// whatever history they have and leave reconciliation to the caller.
    pub fn load(&self, files: &FileSet) -> Result<TimingSnapshot> {
        match self {
            Self::Uniform => Ok(TimingSnapshot::new()),
            Self::LineCount => Ok(line_count::estimate(files)),
            Self::JUnit { path: Some(pattern) } => junit::load_glob(pattern),
            Self::JUnit { path: None } => {
                info!("using test times from JUnit report at stdin");
                junit::parse_report(std::io::stdin().lock())
            }
            Self::CircleCi(settings) => {
                let client = circleci::CircleCiClient::new(settings)?;
                circleci::load_timings(&client, &settings.branch)
            }
        }
    }
}
