//! Run configuration
//!
//! Flags, environment (through clap) and the optional `split-tests.toml` are
//! resolved exactly once into an immutable [`RunMode`]. Nothing downstream
//! reads the process environment.
//!
//! # Example split-tests.toml
//!
//! ```toml
//! glob = ["spec/**/*_spec.rb", "engines/*/spec/**/*_spec.rb"]
//! exclude_glob = "spec/manual/**/*_spec.rb"
//! bias = "0=45"
//! junit_path = "tmp/reports/*.xml"
//! circleci_project = "github/acme/shop"
//! ```

use crate::bias::BiasVector;
use crate::cli::Cli;
use crate::discovery::DEFAULT_TEST_GLOB;
use crate::error::{Result, SplitError};
use crate::sources::{CircleCiSettings, TimingSource};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "split-tests.toml";

/// One glob or a list of globs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GlobList {
    One(String),
    Many(Vec<String>),
}

impl GlobList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(glob) => vec![glob],
            Self::Many(globs) => globs,
        }
    }
}

/// Contents of `split-tests.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub glob: Option<GlobList>,
    pub exclude_glob: Option<String>,
    pub bias: Option<String>,
    pub junit_path: Option<String>,
    pub circleci_project: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SplitError::config(format!("invalid configuration file: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SplitError::config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given, else `default` when it exists
    pub fn locate(explicit: Option<&Path>, default: &Path) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::from_file(path).map(Some),
            None if default.is_file() => Self::from_file(default).map(Some),
            None => Ok(None),
        }
    }
}

/// Everything a split run needs
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Container whose files are printed
    pub index: usize,
    /// Include patterns, at least one
    pub include: Vec<String>,
    pub exclude: Option<String>,
    pub source: TimingSource,
    /// One entry per container; its length is the container count
    pub biases: BiasVector,
}

impl SplitConfig {
    pub fn total(&self) -> usize {
        self.biases.len()
    }
}

/// Inputs and output of update mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    pub old_glob: String,
    pub new_glob: String,
    pub out: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Split(SplitConfig),
    Update(UpdateConfig),
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl RunMode {
    /// Validate flags against the optional file config; flags win
    pub fn resolve(cli: &Cli, file: Option<FileConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();
        if cli.wants_update() {
            resolve_update(cli).map(Self::Update)
        } else {
            resolve_split(cli, file).map(Self::Split)
        }
    }
}

fn resolve_update(cli: &Cli) -> Result<UpdateConfig> {
    match (
        non_empty(cli.junit_update.as_deref()),
        non_empty(cli.junit_new.as_deref()),
        cli.junit_out.clone().filter(|p| !p.as_os_str().is_empty()),
    ) {
        (Some(old_glob), Some(new_glob), Some(out)) => Ok(UpdateConfig {
            old_glob,
            new_glob,
            out,
        }),
        _ => Err(SplitError::config(
            "junit-update requires --junit-update, --junit-new, and --junit-out flags",
        )),
    }
}

fn resolve_split(cli: &Cli, file: FileConfig) -> Result<SplitConfig> {
    let (index, total) = match (cli.split_index, cli.split_total) {
        (Some(index), Some(total)) if total > 0 && index < total => (index, total),
        _ => {
            return Err(SplitError::config(
                "--split-index and --split-total (and environment variables) are missing or invalid",
            ))
        }
    };

    let source = resolve_source(cli, &file)?;

    let biases = match non_empty(cli.bias.as_deref()).or(file.bias) {
        Some(spec) => BiasVector::parse(&spec, total)
            .map_err(|e| SplitError::config(format!("failed to parse bias: {}", e)))?,
        None => BiasVector::zeros(total)?,
    };

    let include = if !cli.glob.is_empty() {
        cli.glob.clone()
    } else {
        file.glob
            .map(GlobList::into_vec)
            .filter(|globs| !globs.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_TEST_GLOB.to_string()])
    };

    Ok(SplitConfig {
        index,
        include,
        exclude: non_empty(cli.exclude_glob.as_deref()).or(file.exclude_glob),
        source,
        biases,
    })
}

/// Line count wins over JUnit, JUnit over CircleCI
fn resolve_source(cli: &Cli, file: &FileConfig) -> Result<TimingSource> {
    if cli.line_count {
        return Ok(TimingSource::LineCount);
    }
    if cli.junit {
        let path = non_empty(cli.junit_path.as_deref())
            .or_else(|| non_empty(file.junit_path.as_deref()));
        return Ok(TimingSource::JUnit { path });
    }

    let Some(token) = non_empty(cli.circleci_key.as_deref()) else {
        return Ok(TimingSource::Uniform);
    };
    let project = non_empty(cli.circleci_project.as_deref())
        .or_else(|| non_empty(file.circleci_project.as_deref()));
    match (project, non_empty(cli.circleci_branch.as_deref())) {
        (Some(project), Some(branch)) => Ok(TimingSource::CircleCi(CircleCiSettings {
            project,
            branch,
            token,
        })),
        _ => Err(SplitError::config(
            "Incomplete CircleCI configuration (set --circleci-key, --circleci-project, and --circleci-branch)",
        )),
    }
}
