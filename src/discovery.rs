//! Test file discovery from glob patterns
//!
//! Patterns support `**` for any number of nested directories, e.g.
//! `spec/**/*_spec.rb`. Patterns are relative to the working directory.

use crate::error::{Result, SplitError};
use crate::timing::FileSet;
use tracing::debug;

/// Default pattern: every rspec file under `spec/`
pub const DEFAULT_TEST_GLOB: &str = "spec/**/*_spec.rb";

fn expand(pattern: &str, what: &str) -> Result<Vec<String>> {
    let entries = glob::glob(pattern).map_err(|e| {
        SplitError::unavailable(format!("failed to enumerate {} file set: {}", what, e))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            SplitError::unavailable(format!("failed to enumerate {} file set: {}", what, e))
        })?;
        if path.is_file() {
            paths.push(path.to_string_lossy().into_owned());
        }
    }
    Ok(paths)
}

/// Collect the files matching any `include` pattern and no `exclude` pattern
pub fn discover(include: &[String], exclude: Option<&str>) -> Result<FileSet> {
    let mut files = FileSet::new();
    for pattern in include {
        for path in expand(pattern, "current")? {
            files.insert(&path);
        }
    }
    debug!(count = files.len(), "discovered test files");

    if let Some(pattern) = exclude.filter(|p| !p.is_empty()) {
        let mut removed = 0usize;
        for path in expand(pattern, "excluded")? {
            if files.remove(&path) {
                removed += 1;
            }
        }
        debug!(removed, pattern, "applied exclude pattern");
    }

    Ok(files)
}
