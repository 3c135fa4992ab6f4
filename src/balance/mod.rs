// Timing reconciliation and balanced partitioning
//
// The pure core of split-tests. Nothing in here performs I/O: sources hand
// in a TimingSnapshot, the aggregator reconciles it against the files that
// exist now, the merger smooths historical drift in update mode, and the
// partitioner assigns files to containers.
//
// Partitioning is greedy longest-processing-time-first (LPT), a
// 2-approximation of the minimum makespan on identical machines, with a
// fixed additive per-container bias that only steers selection.

mod aggregate;
mod merge;
mod partition;

pub use aggregate::{reconcile, DEFAULT_FILE_TIME};
pub use merge::{merge, smooth, SLIDING_WINDOW_OLD_WEIGHT};
pub use partition::{partition, Bucket, Partition};

#[cfg(test)]
mod tests;
