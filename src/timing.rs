//! Timing data model: file sets and per-file duration snapshots
//!
//! Both containers are ordered so that anything rendered from them (reports,
//! diagnostics) is reproducible across runs and platforms.

use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Lexically clean a slash-separated path
///
/// Removes `.` segments, duplicate slashes and trailing slashes, and resolves
/// `..` against the preceding segment where one exists. The filesystem is
/// never consulted, so symlinks are not resolved.
///
/// # Example
/// ```
/// use split_tests::timing::normalize_path;
///
/// assert_eq!(normalize_path("./spec//models/../user_spec.rb"), "spec/user_spec.rb");
/// assert_eq!(normalize_path(""), ".");
/// ```
pub fn normalize_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// The test files that currently exist, after include/exclude filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeSet<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, normalizing it first
    pub fn insert(&mut self, path: &str) -> bool {
        self.files.insert(normalize_path(path))
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.files.remove(&normalize_path(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for FileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for path in iter {
            set.insert(path.as_ref());
        }
        set
    }
}

/// Mapping from file path to a non-negative duration estimate
///
/// Durations are seconds for report-based sources and line counts for the
/// line-count proxy. Negative and non-finite values are stored as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingSnapshot {
    durations: BTreeMap<String, f64>,
}

fn sanitize(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

impl TimingSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration for `path`, replacing any previous value
    pub fn insert(&mut self, path: impl Into<String>, duration: f64) {
        self.durations.insert(path.into(), sanitize(duration));
    }

    /// Record an observation from a timing source
    ///
    /// The path is normalized and repeated observations of the same file
    /// accumulate, so a file with many test cases reports their sum.
    pub fn add_observation(&mut self, path: &str, duration: f64) {
        *self.durations.entry(normalize_path(path)).or_insert(0.0) += sanitize(duration);
    }

    /// Add every entry of `other` into this snapshot, summing shared paths
    pub fn absorb(&mut self, other: TimingSnapshot) {
        for (path, duration) in other.durations {
            *self.durations.entry(path).or_insert(0.0) += duration;
        }
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.durations.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.durations.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Drop every entry for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&str, f64) -> bool) {
        self.durations.retain(|path, duration| keep(path, *duration));
    }

    /// Entries ordered by path
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.durations.iter().map(|(p, d)| (p.as_str(), *d))
    }

    /// Sum of all durations
    pub fn total(&self) -> f64 {
        self.durations.values().sum()
    }

    /// Arithmetic mean of all durations, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.durations.is_empty() {
            None
        } else {
            Some(self.total() / self.durations.len() as f64)
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for TimingSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut snapshot = TimingSnapshot::new();
        for (path, duration) in iter {
            snapshot.insert(path, duration);
        }
        snapshot
    }
}

impl IntoIterator for TimingSnapshot {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.durations.into_iter()
    }
}
