// Greedy longest-processing-time-first assignment of files to containers

use crate::bias::BiasVector;
use crate::timing::TimingSnapshot;
use std::cmp::Ordering;

/// Files assigned to one container and their real (unbiased) total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bucket {
    /// Files in assignment order
    pub files: Vec<String>,
    /// Sum of the files' durations, without the container's bias
    pub total: f64,
}

/// The full assignment: exactly one bucket per container
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    buckets: Vec<Bucket>,
}

impl Partition {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Unbiased totals, index-aligned with the buckets
    pub fn totals(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.total).collect()
    }

    /// Largest bucket total
    pub fn makespan(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }
}

/// Duration descending, then path ascending
fn longest_first(a: &(&str, f64), b: &(&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Index of the bucket with the smallest `total + bias`, lowest index on ties
fn least_loaded(buckets: &[Bucket], biases: &BiasVector) -> usize {
    let mut best = 0;
    for index in 1..buckets.len() {
        if buckets[index].total + biases.get(index) < buckets[best].total + biases.get(best) {
            best = index;
        }
    }
    best
}

/// Assign every file in `timings` to one of `biases.len()` buckets
///
/// Files are taken largest first (ties by path) and each goes to the bucket
/// whose running total plus bias is smallest. The bias only steers the
/// choice; it is never added to a bucket's total. The sort makes the result
/// independent of how `timings` was built.
///
/// # Example
/// ```
/// use split_tests::balance::partition;
/// use split_tests::bias::BiasVector;
/// use split_tests::timing::TimingSnapshot;
///
/// let timings: TimingSnapshot = [("a", 10.0), ("b", 9.0), ("c", 5.0), ("d", 1.0)]
///     .into_iter()
///     .collect();
/// let result = partition(&timings, &BiasVector::zeros(2).unwrap());
/// assert_eq!(result.buckets()[0].files, vec!["a", "d"]);
/// assert_eq!(result.totals(), vec![11.0, 14.0]);
/// ```
pub fn partition(timings: &TimingSnapshot, biases: &BiasVector) -> Partition {
    let mut ordered: Vec<(&str, f64)> = timings.iter().collect();
    ordered.sort_by(longest_first);

    let mut buckets = vec![Bucket::default(); biases.len()];
    for (path, duration) in ordered {
        let target = least_loaded(&buckets, biases);
        buckets[target].files.push(path.to_string());
        buckets[target].total += duration;
    }

    Partition { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_first_orders_by_duration_then_path() {
        let mut items = vec![("b", 1.0), ("a", 1.0), ("c", 5.0), ("d", 0.0)];
        items.sort_by(longest_first);
        let paths: Vec<&str> = items.iter().map(|(p, _)| *p).collect();
        assert_eq!(paths, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_least_loaded_prefers_lowest_index_on_tie() {
        let buckets = vec![Bucket::default(); 3];
        let biases = BiasVector::zeros(3).unwrap();
        assert_eq!(least_loaded(&buckets, &biases), 0);
    }

    #[test]
    fn test_least_loaded_accounts_for_bias() {
        let buckets = vec![Bucket::default(); 3];
        let biases = BiasVector::from_values(vec![2.0, 1.0, 1.0]).unwrap();
        assert_eq!(least_loaded(&buckets, &biases), 1);
    }

    #[test]
    fn test_makespan() {
        let timings: TimingSnapshot = [("a", 3.0), ("b", 2.0), ("c", 2.0)].into_iter().collect();
        let result = partition(&timings, &BiasVector::zeros(2).unwrap());
        assert_eq!(result.makespan(), 4.0);
    }
}
