// Scenario tests for the reconcile -> merge -> partition pipeline
//
// Durations mirror real suites: a few heavy feature specs, a long tail of
// small unit specs.

use super::*;
use crate::bias::BiasVector;
use crate::timing::{FileSet, TimingSnapshot};

fn snapshot(entries: &[(&str, f64)]) -> TimingSnapshot {
    entries.iter().map(|(p, d)| (*p, *d)).collect()
}

fn files_of(bucket: &Bucket) -> Vec<&str> {
    bucket.files.iter().map(String::as_str).collect()
}

/// Four files across two containers with no bias
#[test]
fn test_scenario_no_bias() {
    let timings = snapshot(&[("a", 10.0), ("b", 9.0), ("c", 5.0), ("d", 1.0)]);
    let result = partition(&timings, &BiasVector::zeros(2).unwrap());

    assert_eq!(files_of(&result.buckets()[0]), vec!["a", "d"]);
    assert_eq!(files_of(&result.buckets()[1]), vec!["b", "c"]);
    assert_eq!(result.totals(), vec![11.0, 14.0]);
}

/// Container 1 runs a linter worth 5 seconds, so it receives less test time
#[test]
fn test_scenario_with_bias() {
    let timings = snapshot(&[("a", 10.0), ("b", 9.0), ("c", 5.0), ("d", 1.0)]);
    let biases = BiasVector::parse("1=5", 2).unwrap();
    let result = partition(&timings, &biases);

    assert_eq!(files_of(&result.buckets()[0]), vec!["a", "c"]);
    assert_eq!(files_of(&result.buckets()[1]), vec!["b", "d"]);
    // Reported totals never include the bias
    assert_eq!(result.totals(), vec![15.0, 10.0]);
}

#[test]
fn test_empty_input_yields_empty_buckets() {
    let result = partition(&TimingSnapshot::new(), &BiasVector::zeros(3).unwrap());
    assert_eq!(result.len(), 3);
    assert!(result.buckets().iter().all(|b| b.files.is_empty()));
    assert_eq!(result.totals(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_more_containers_than_files() {
    let timings = snapshot(&[("a", 1.0), ("b", 2.0)]);
    let result = partition(&timings, &BiasVector::zeros(4).unwrap());

    assert_eq!(files_of(&result.buckets()[0]), vec!["b"]);
    assert_eq!(files_of(&result.buckets()[1]), vec!["a"]);
    assert!(result.buckets()[2].files.is_empty());
    assert!(result.buckets()[3].files.is_empty());
}

#[test]
fn test_single_container_takes_everything_in_order() {
    let timings = snapshot(&[("z", 1.0), ("a", 1.0), ("m", 3.0)]);
    let result = partition(&timings, &BiasVector::zeros(1).unwrap());
    assert_eq!(files_of(&result.buckets()[0]), vec!["m", "a", "z"]);
    assert_eq!(result.totals(), vec![5.0]);
}

/// Equal durations go path-ascending, first one to the lowest free bucket
#[test]
fn test_tie_break_by_path() {
    let timings = snapshot(&[("spec/b_spec.rb", 2.0), ("spec/a_spec.rb", 2.0)]);
    let result = partition(&timings, &BiasVector::zeros(2).unwrap());
    assert_eq!(files_of(&result.buckets()[0]), vec!["spec/a_spec.rb"]);
    assert_eq!(files_of(&result.buckets()[1]), vec!["spec/b_spec.rb"]);
}

#[test]
fn test_zero_durations_sort_last() {
    let timings = snapshot(&[("a", 0.0), ("b", 0.0), ("c", 4.0)]);
    let result = partition(&timings, &BiasVector::zeros(1).unwrap());
    assert_eq!(files_of(&result.buckets()[0]), vec!["c", "a", "b"]);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let forward = snapshot(&[("a", 3.0), ("b", 3.0), ("c", 1.0), ("d", 7.0)]);
    let backward = snapshot(&[("d", 7.0), ("c", 1.0), ("b", 3.0), ("a", 3.0)]);
    let biases = BiasVector::parse("0=1", 3).unwrap();
    assert_eq!(partition(&forward, &biases), partition(&backward, &biases));
}

#[test]
fn test_negative_bias_attracts_files() {
    let timings = snapshot(&[("a", 4.0), ("b", 3.0), ("c", 2.0)]);
    let biases = BiasVector::parse("1=-10", 2).unwrap();
    let result = partition(&timings, &biases);
    assert!(result.buckets()[0].files.is_empty());
    assert_eq!(result.totals(), vec![0.0, 9.0]);
}

#[test]
fn test_merge_laws() {
    let merged = merge(&snapshot(&[("a", 10.0)]), &snapshot(&[("a", 20.0)]));
    assert!((merged.get("a").unwrap() - 11.0).abs() < 1e-9);

    let merged = merge(&TimingSnapshot::new(), &snapshot(&[("b", 5.0)]));
    assert_eq!(merged, snapshot(&[("b", 5.0)]));

    let merged = merge(&snapshot(&[("c", 5.0)]), &TimingSnapshot::new());
    assert!(merged.is_empty());
}

#[test]
fn test_reconcile_then_partition_covers_every_file() {
    let current: FileSet = ["spec/a_spec.rb", "spec/b_spec.rb", "spec/new_spec.rb"]
        .into_iter()
        .collect();
    let history = snapshot(&[
        ("spec/a_spec.rb", 30.0),
        ("spec/b_spec.rb", 10.0),
        ("spec/deleted_spec.rb", 99.0),
    ]);

    let reconciled = reconcile(&current, history, true);
    assert_eq!(reconciled.get("spec/new_spec.rb"), Some(20.0));

    let result = partition(&reconciled, &BiasVector::zeros(2).unwrap());
    let mut assigned: Vec<&str> = result
        .buckets()
        .iter()
        .flat_map(|b| b.files.iter().map(String::as_str))
        .collect();
    assigned.sort_unstable();
    assert_eq!(
        assigned,
        vec!["spec/a_spec.rb", "spec/b_spec.rb", "spec/new_spec.rb"]
    );
    assert_eq!(result.totals(), vec![30.0, 30.0]);
}

/// Update mode followed by a split on the smoothed baseline
#[test]
fn test_smoothed_baseline_feeds_partition() {
    let old = snapshot(&[("slow", 100.0), ("fast", 1.0)]);
    let new = snapshot(&[("slow", 10.0), ("fast", 1.0), ("added", 5.0)]);
    let baseline = merge(&old, &new);

    assert!((baseline.get("slow").unwrap() - 91.0).abs() < 1e-9);
    assert_eq!(baseline.get("added"), Some(5.0));

    let result = partition(&baseline, &BiasVector::zeros(2).unwrap());
    assert_eq!(files_of(&result.buckets()[0]), vec!["slow"]);
    assert_eq!(files_of(&result.buckets()[1]), vec!["added", "fast"]);
}
