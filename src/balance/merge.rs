// Exponential smoothing of timing baselines (update mode)

use crate::timing::TimingSnapshot;

/// Weight of the previous baseline when blending with a new observation
pub const SLIDING_WINDOW_OLD_WEIGHT: f64 = 0.9;

/// Blend one file's previous and newest duration
///
/// `w * old + (1 - w) * new` with `w = 0.9`: history dominates, drift is
/// still tracked.
pub fn smooth(old: f64, new: f64) -> f64 {
    SLIDING_WINDOW_OLD_WEIGHT * old + (1.0 - SLIDING_WINDOW_OLD_WEIGHT) * new
}

/// Merge a persisted baseline with the timings of the latest run
///
/// Files in both are smoothed, files only in `new` are taken as-is, and
/// files only in `old` are dropped since they no longer ran.
pub fn merge(old: &TimingSnapshot, new: &TimingSnapshot) -> TimingSnapshot {
    new.iter()
        .map(|(path, new_time)| {
            let merged = match old.get(path) {
                Some(old_time) => smooth(old_time, new_time),
                None => new_time,
            };
            (path, merged)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_weights_history() {
        assert!((smooth(10.0, 20.0) - 11.0).abs() < 1e-9);
        assert_eq!(smooth(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_merge_drops_old_only_entries() {
        let old: TimingSnapshot = [("gone", 3.0), ("kept", 10.0)].into_iter().collect();
        let new: TimingSnapshot = [("kept", 20.0), ("fresh", 1.5)].into_iter().collect();
        let merged = merge(&old, &new);
        assert_eq!(merged.len(), 2);
        assert!(!merged.contains("gone"));
        assert_eq!(merged.get("fresh"), Some(1.5));
        assert!((merged.get("kept").unwrap() - 11.0).abs() < 1e-9);
    }
}
