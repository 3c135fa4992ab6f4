//! End-to-end runs: split mode and update mode
//!
//! Split: discover files → load timings → reconcile → partition.
//! Update: load old and new reports → smooth → write baseline.

use crate::balance::{merge, partition, reconcile, Bucket, Partition};
use crate::bias::BiasVector;
use crate::config::{SplitConfig, UpdateConfig};
use crate::discovery;
use crate::error::{Result, SplitError};
use crate::report;
use crate::sources::junit;
use crate::timing::{FileSet, TimingSnapshot};
use tracing::{debug, info};

/// Result of a split run
///
/// The selected index is always a valid bucket of the partition.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    partition: Partition,
    index: usize,
    authoritative: bool,
}

impl SplitOutcome {
    /// Pair a partition with the container whose files are printed
    pub fn new(partition: Partition, index: usize, authoritative: bool) -> Result<Self> {
        if index >= partition.len() {
            return Err(SplitError::config(format!(
                "split index {} is out of range for {} containers",
                index,
                partition.len()
            )));
        }
        Ok(Self {
            partition,
            index,
            authoritative,
        })
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the timings came from real test runs
    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    pub fn selected(&self) -> &Bucket {
        &self.partition.buckets()[self.index]
    }

    /// Space-joined file list of the selected container
    pub fn line(&self) -> String {
        report::bucket_line(self.selected())
    }

    /// Estimated run time of the selected container, without bias
    pub fn expected_time(&self) -> f64 {
        self.selected().total
    }
}

/// Reconcile raw timings with the current files and partition them
pub fn split_files(
    files: &FileSet,
    raw: TimingSnapshot,
    biases: &BiasVector,
    authoritative: bool,
) -> Partition {
    let timings = reconcile(files, raw, authoritative);
    let result = partition(&timings, biases);
    debug!(
        containers = result.len(),
        files = files.len(),
        makespan = result.makespan(),
        "partitioned test files"
    );
    result
}

/// Run split mode
pub fn run_split(config: &SplitConfig) -> Result<SplitOutcome> {
    if config.index >= config.total() {
        return Err(SplitError::config(format!(
            "split index {} is out of range for {} containers",
            config.index,
            config.total()
        )));
    }

    let files = discovery::discover(&config.include, config.exclude.as_deref())?;
    debug!(source = config.source.name(), "loading timings");
    let raw = config.source.load(&files)?;
    let authoritative = config.source.is_authoritative();

    SplitOutcome::new(
        split_files(&files, raw, &config.biases, authoritative),
        config.index,
        authoritative,
    )
}

/// Run update mode and return the baseline that was written
pub fn run_update(config: &UpdateConfig) -> Result<TimingSnapshot> {
    let old = junit::load_glob(&config.old_glob)?;
    info!("loaded {} test files from old timings", old.len());

    let new = junit::load_glob(&config.new_glob)?;
    info!("loaded {} test files from new timings", new.len());

    let merged = merge(&old, &new);
    info!(
        "merged {} test files (removed tests not in new, used sliding window for existing tests)",
        merged.len()
    );

    report::write_junit(&merged, &config.out)?;
    info!("wrote updated timings to {}", config.out.display());
    Ok(merged)
}
