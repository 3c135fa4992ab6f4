//! Line count as a duration proxy
//!
//! Used when no test history exists yet: longer spec files usually take
//! longer to run.

use crate::timing::{FileSet, TimingSnapshot};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use tracing::warn;

/// Count newline bytes in `reader`
pub fn count_lines<R: Read>(reader: R) -> io::Result<usize> {
    let mut reader = BufReader::with_capacity(32 * 1024, reader);
    let mut count = 0;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(count);
        }
        count += buf.iter().filter(|&&b| b == b'\n').count();
        let consumed = buf.len();
        reader.consume(consumed);
    }
}

/// Estimate each file's weight by its line count
///
/// Unreadable files are skipped with a warning; reconciliation fills them in.
pub fn estimate(files: &FileSet) -> TimingSnapshot {
    let mut snapshot = TimingSnapshot::new();
    for path in files.iter() {
        match File::open(path).and_then(count_lines) {
            Ok(lines) => snapshot.insert(path, lines as f64),
            Err(e) => warn!("failed to count lines in file {}: {}", path, e),
        }
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines("".as_bytes()).unwrap(), 0);
        assert_eq!(count_lines("one".as_bytes()).unwrap(), 0);
        assert_eq!(count_lines("one\ntwo\n".as_bytes()).unwrap(), 2);
        assert_eq!(count_lines("\n\n\n".as_bytes()).unwrap(), 3);
    }

    #[test]
    fn test_count_lines_spans_buffers() {
        let data = "x\n".repeat(40_000);
        assert_eq!(count_lines(data.as_bytes()).unwrap(), 40_000);
    }

    #[test]
    fn test_estimate_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_spec.rb");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "describe 'a' do\n  it {{ }}\nend").unwrap();

        let existing = path.to_string_lossy().to_string();
        let missing = dir.path().join("missing_spec.rb").to_string_lossy().to_string();
        let files: FileSet = [existing.as_str(), missing.as_str()].into_iter().collect();

        let snapshot = estimate(&files);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&existing), Some(3.0));
        assert!(!snapshot.contains(&missing));
    }
}
