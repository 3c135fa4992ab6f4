// Reconcile raw timings against the current file set
//
// Stale entries carry no information and are dropped; files with no history
// get the mean of what is left so new files neither dominate nor vanish.

use crate::timing::{FileSet, TimingSnapshot};
use tracing::{debug, warn};

/// Weight given to every file when no history survives reconciliation
pub const DEFAULT_FILE_TIME: f64 = 1.0;

/// Reconcile `historical` against `current_files`
///
/// - entries for files that no longer exist are removed
/// - files with no entry get the mean of the remaining durations, or
///   [`DEFAULT_FILE_TIME`] when none remain
/// - when `source_is_authoritative` (timings came from real test runs rather
///   than a line-count proxy), every filled-in file is logged as a warning
///
/// The result has exactly the keys of `current_files`.
pub fn reconcile(
    current_files: &FileSet,
    mut historical: TimingSnapshot,
    source_is_authoritative: bool,
) -> TimingSnapshot {
    let before = historical.len();
    historical.retain(|path, _| current_files.contains(path));
    debug!(
        dropped = before - historical.len(),
        kept = historical.len(),
        "removed timings for deleted files"
    );

    let fill = historical.mean().unwrap_or(DEFAULT_FILE_TIME);

    let missing: Vec<&str> = current_files
        .iter()
        .filter(|path| !historical.contains(path))
        .collect();
    for path in missing {
        if source_is_authoritative {
            warn!("missing file time for {}", path);
        }
        historical.insert(path, fill);
    }

    historical
}
