//! CircleCI build history (API v1.1)
//!
//! Timings come from the test metadata of the newest successful build on the
//! current branch. A branch without successful builds (typically a fresh
//! feature branch) falls back to the default branch.

use super::CircleCiSettings;
use crate::error::{Result, SplitError};
use crate::timing::TimingSnapshot;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

/// Root of the v1.1 project API
pub const API_ROOT: &str = "https://circleci.com/api/v1.1/project";

/// Branch consulted when the current branch has no successful builds
pub const DEFAULT_BRANCH: &str = "master";

/// One entry of a branch's build list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildSummary {
    pub build_num: u64,
}

/// Test metadata for a single build
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestResults {
    #[serde(default)]
    pub tests: Vec<TestResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub run_time: Option<f64>,
}

/// Read access to a project's build history
pub trait BuildHistory {
    /// Successful builds of `branch`, newest first
    fn successful_builds(&self, branch: &str) -> Result<Vec<BuildSummary>>;

    /// Test results recorded for `build_num`
    fn test_results(&self, build_num: u64) -> Result<TestResults>;
}

/// Blocking HTTP client for the CircleCI API
pub struct CircleCiClient {
    http: Client,
    project_url: String,
    token: String,
}

impl CircleCiClient {
    pub fn new(settings: &CircleCiSettings) -> Result<Self> {
        Self::with_api_root(settings, API_ROOT)
    }

    /// Client against a different API root (CircleCI server installs)
    pub fn with_api_root(settings: &CircleCiSettings, api_root: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("split-tests/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SplitError::unavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            project_url: project_url(api_root, &settings.project),
            token: settings.token.clone(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "calling CircleCI API");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[("circle-token", self.token.as_str())])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                SplitError::unavailable(format!(
                    "error calling CircleCI API at {}: {}",
                    url,
                    e.without_url()
                ))
            })?;

        response.json().map_err(|e| {
            SplitError::unavailable(format!(
                "error parsing CircleCI JSON at {}: {}",
                url,
                e.without_url()
            ))
        })
    }
}

impl BuildHistory for CircleCiClient {
    fn successful_builds(&self, branch: &str) -> Result<Vec<BuildSummary>> {
        self.get_json(&branch_builds_url(&self.project_url, branch))
    }

    fn test_results(&self, build_num: u64) -> Result<TestResults> {
        self.get_json(&test_results_url(&self.project_url, build_num))
    }
}

fn project_url(api_root: &str, project: &str) -> String {
    format!("{}/{}", api_root.trim_end_matches('/'), project)
}

fn branch_builds_url(project_url: &str, branch: &str) -> String {
    format!("{}/tree/{}?filter=successful", project_url, branch)
}

fn test_results_url(project_url: &str, build_num: u64) -> String {
    format!("{}/{}/tests", project_url, build_num)
}

/// Fetch timings from the newest successful build of `branch`
///
/// Falls back to [`DEFAULT_BRANCH`] when `branch` has no successful builds;
/// no builds anywhere is an empty snapshot.
pub fn load_timings<H: BuildHistory>(history: &H, branch: &str) -> Result<TimingSnapshot> {
    let mut builds = history.successful_builds(branch)?;
    if builds.is_empty() && branch != DEFAULT_BRANCH {
        info!(
            "no successful builds on {}, falling back to {}",
            branch, DEFAULT_BRANCH
        );
        builds = history.successful_builds(DEFAULT_BRANCH)?;
    }

    let mut snapshot = TimingSnapshot::new();
    let Some(latest) = builds.first() else {
        info!("no successful CircleCI builds found");
        return Ok(snapshot);
    };

    info!("using test timings from CircleCI build {}", latest.build_num);
    for test in history.test_results(latest.build_num)?.tests {
        if let Some(file) = test.file {
            snapshot.add_observation(&file, test.run_time.unwrap_or(0.0));
        }
    }
    Ok(snapshot)
}
