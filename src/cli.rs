//! CLI argument parsing for split-tests

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "split-tests")]
#[command(version)]
#[command(about = "Splits test files into containers of even duration", long_about = None)]
pub struct Cli {
    /// This test container's index
    #[arg(long = "split-index", env = "CIRCLE_NODE_INDEX", value_name = "INDEX")]
    pub split_index: Option<usize>,

    /// Total number of containers
    #[arg(long = "split-total", env = "CIRCLE_NODE_TOTAL", value_name = "TOTAL")]
    pub split_total: Option<usize>,

    /// Glob pattern to find test files (repeatable). Single-quote it to avoid shell expansion
    #[arg(long = "glob", value_name = "PATTERN")]
    pub glob: Vec<String>,

    /// Glob pattern to exclude test files. Single-quote it too
    #[arg(long = "exclude-glob", value_name = "PATTERN")]
    pub exclude_glob: Option<String>,

    /// Use JUnit XML reports for test times
    #[arg(long = "junit")]
    pub junit: bool,

    /// JUnit XML report path or glob (reads stdin when omitted)
    #[arg(long = "junit-path", value_name = "GLOB")]
    pub junit_path: Option<String>,

    /// Use line count to estimate test times
    #[arg(long = "line-count")]
    pub line_count: bool,

    /// CircleCI API key; enables CircleCI timings
    #[arg(
        long = "circleci-key",
        env = "CIRCLECI_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub circleci_key: Option<String>,

    /// CircleCI project slug (e.g. github/acme/shop)
    #[arg(long = "circleci-project", value_name = "PROJECT")]
    pub circleci_project: Option<String>,

    /// Current branch for CircleCI
    #[arg(long = "circleci-branch", env = "CIRCLE_BRANCH", value_name = "BRANCH")]
    pub circleci_branch: Option<String>,

    /// Extra fixed time per container, e.g. 0=30,2=12.5 when container 0 also runs a linter
    #[arg(long = "bias", value_name = "INDEX=SECONDS,...")]
    pub bias: Option<String>,

    /// Glob for the previous JUnit baseline (update mode)
    #[arg(long = "junit-update", value_name = "OLD_GLOB")]
    pub junit_update: Option<String>,

    /// Glob for the latest JUnit reports (update mode)
    #[arg(long = "junit-new", value_name = "NEW_GLOB")]
    pub junit_new: Option<String>,

    /// Output path for the smoothed JUnit baseline (update mode)
    #[arg(long = "junit-out", value_name = "PATH")]
    pub junit_out: Option<PathBuf>,

    /// Configuration file (defaults to ./split-tests.toml when present)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable trace-level diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// True when any update-mode flag is present
    pub fn wants_update(&self) -> bool {
        self.junit_update.is_some() || self.junit_new.is_some() || self.junit_out.is_some()
    }
}
