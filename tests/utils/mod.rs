// Shared helpers for split-tests integration tests
//
// Each test builds a throwaway project in a temp directory and runs the
// binary from there, so relative globs behave as they do in CI.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host CI cannot leak in
const CI_ENV: [&str; 4] = [
    "CIRCLE_NODE_INDEX",
    "CIRCLE_NODE_TOTAL",
    "CIRCLECI_API_KEY",
    "CIRCLE_BRANCH",
];

/// Command for the split-tests binary running inside `dir`
pub fn split_tests(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("split-tests");
    cmd.current_dir(dir).env("RUST_LOG", "info");
    for var in CI_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Create `relative` under `root` with `lines` lines of content
pub fn write_spec(root: &Path, relative: &str, lines: usize) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "it { }\n".repeat(lines)).unwrap();
}

/// JUnit report with one test case per `(file, seconds)` pair
pub fn junit_report(cases: &[(&str, f64)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"rspec\">\n");
    for (file, seconds) in cases {
        xml.push_str(&format!(
            "  <testcase classname=\"x\" name=\"works\" file=\"{}\" time=\"{}\"/>\n",
            file, seconds
        ));
    }
    xml.push_str("</testsuite>\n");
    xml
}

/// Project with four specs and a report timing them 10, 9, 5 and 1 seconds
pub fn timed_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c", "d"] {
        write_spec(dir.path(), &format!("spec/{}_spec.rb", name), 1);
    }
    fs::create_dir_all(dir.path().join("reports")).unwrap();
    fs::write(
        dir.path().join("reports/rspec.xml"),
        junit_report(&[
            ("./spec/a_spec.rb", 10.0),
            ("./spec/b_spec.rb", 9.0),
            ("./spec/c_spec.rb", 5.0),
            ("./spec/d_spec.rb", 1.0),
        ]),
    )
    .unwrap();
    dir
}
