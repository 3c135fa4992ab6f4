//! JUnit XML timing reports
//!
//! Reads the `file` and `time` attributes of `<testcase>` elements, as written
//! by rspec_junit_formatter, jest-junit and friends. Test cases may sit
//! directly under the root or inside nested `<testsuite>` elements.

use crate::error::{Result, SplitError};
use crate::timing::TimingSnapshot;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct JUnitSuite {
    #[serde(rename = "testcase", default)]
    test_cases: Vec<JUnitTestCase>,
    #[serde(rename = "testsuite", default)]
    suites: Vec<JUnitSuite>,
}

#[derive(Debug, Deserialize)]
struct JUnitTestCase {
    #[serde(rename = "@file", default)]
    file: Option<String>,
    #[serde(rename = "@time", default)]
    time: Option<String>,
}

impl JUnitTestCase {
    /// Seconds spent in this case; a missing or blank `time` counts as zero
    fn seconds(&self) -> Result<f64> {
        match self.time.as_deref().map(str::trim) {
            None | Some("") => Ok(0.0),
            Some(text) => text.parse().map_err(|e| {
                SplitError::unavailable(format!(
                    "failed to parse junit xml: invalid time {:?}: {}",
                    text, e
                ))
            }),
        }
    }
}

impl JUnitSuite {
    fn collect_into(&self, snapshot: &mut TimingSnapshot) -> Result<()> {
        for case in &self.test_cases {
            if let Some(file) = &case.file {
                snapshot.add_observation(file, case.seconds()?);
            }
        }
        for suite in &self.suites {
            suite.collect_into(snapshot)?;
        }
        Ok(())
    }
}

/// Parse one JUnit report, summing durations per normalized file
///
/// Test cases without a `file` attribute are skipped.
pub fn parse_report<R: Read>(mut reader: R) -> Result<TimingSnapshot> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| SplitError::unavailable(format!("failed to read junit xml: {}", e)))?;
    parse_report_str(&content)
}

/// Parse a JUnit report held in memory
pub fn parse_report_str(content: &str) -> Result<TimingSnapshot> {
    let suite: JUnitSuite = quick_xml::de::from_str(content)
        .map_err(|e| SplitError::unavailable(format!("failed to parse junit xml: {}", e)))?;

    let mut snapshot = TimingSnapshot::new();
    suite.collect_into(&mut snapshot)?;
    Ok(snapshot)
}

/// Load and sum every report matching `pattern`
///
/// An empty pattern or a pattern with no matches yields an empty snapshot.
pub fn load_glob(pattern: &str) -> Result<TimingSnapshot> {
    let mut snapshot = TimingSnapshot::new();
    if pattern.is_empty() {
        return Ok(snapshot);
    }

    let entries = glob::glob(pattern).map_err(|e| {
        SplitError::unavailable(format!("failed to match jUnit filename pattern: {}", e))
    })?;

    let mut matched = 0usize;
    for entry in entries {
        let path = entry.map_err(|e| {
            SplitError::unavailable(format!("failed to match jUnit filename pattern: {}", e))
        })?;
        let file = File::open(&path).map_err(|e| {
            SplitError::unavailable(format!(
                "failed to open junit xml {}: {}",
                path.display(),
                e
            ))
        })?;
        info!("loaded test times from {}", path.display());
        snapshot.absorb(parse_report(file)?);
        matched += 1;
    }

    if matched == 0 {
        warn!("no files matched pattern {}", pattern);
    }

    Ok(snapshot)
}
