//! Output rendering
//!
//! The selected container's files go to stdout as one space-separated line,
//! ready for `rspec $(split-tests ...)`. In update mode the merged baseline is
//! written back as a JUnit XML report, so the next split can read it with
//! `--junit --junit-path`.

use crate::balance::Bucket;
use crate::error::{Result, SplitError};
use crate::timing::TimingSnapshot;
use serde::Serialize;
use std::fs;
use std::path::Path;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Suite name written into merged reports
pub const SUITE_NAME: &str = "rspec";

#[derive(Serialize)]
#[serde(rename = "testsuite")]
struct TestSuiteXml<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@tests")]
    tests: usize,
    #[serde(rename = "testcase")]
    test_cases: Vec<TestCaseXml<'a>>,
}

#[derive(Serialize)]
struct TestCaseXml<'a> {
    #[serde(rename = "@file")]
    file: &'a str,
    #[serde(rename = "@time")]
    time: String,
}

/// Space-joined file list for one container
pub fn bucket_line(bucket: &Bucket) -> String {
    bucket.files.join(" ")
}

/// Format a duration as a plain decimal
///
/// `Display` for `f64` never switches to exponent notation and prints the
/// shortest representation that round-trips.
pub fn format_duration(seconds: f64) -> String {
    format!("{}", seconds)
}

/// Render `timings` as a JUnit XML document, one test case per file
pub fn render_junit(timings: &TimingSnapshot) -> Result<String> {
    let suite = TestSuiteXml {
        name: SUITE_NAME,
        tests: timings.len(),
        test_cases: timings
            .iter()
            .map(|(file, seconds)| TestCaseXml {
                file,
                time: format_duration(seconds),
            })
            .collect(),
    };

    let mut xml = String::from(XML_HEADER);
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    suite
        .serialize(serializer)
        .map_err(|e| SplitError::Report(format!("failed to encode JUnit XML: {}", e)))?;
    xml.push('\n');
    Ok(xml)
}

/// Write `timings` as a JUnit XML report to `path`
pub fn write_junit(timings: &TimingSnapshot, path: &Path) -> Result<()> {
    let xml = render_junit(timings)?;
    fs::write(path, xml).map_err(|e| {
        SplitError::Report(format!("failed to create {}: {}", path.display(), e))
    })
}
