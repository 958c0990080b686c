//! Cycle length and fertile-window computation.
//!
//! The fertile window uses a fixed offset heuristic: first fertile day is
//! `length - 18`, last is `length - 11` (luteal phase ~14 days, sperm
//! viability ~5 days before ovulation). Downstream consumers assume exactly
//! this policy; do not substitute another estimate.

use crate::{CycleRecord, Error, FertileWindow, Result};
use chrono::NaiveDate;

/// Compute a cycle record from an inclusive start/end date pair
///
/// Fails with `Error::InvalidRange` if `start >= end`. Pure; appending the
/// record to the cycle list is the caller's responsibility.
pub fn compute_cycle(id: u64, start: NaiveDate, end: NaiveDate) -> Result<CycleRecord> {
    if start >= end {
        return Err(Error::InvalidRange { start, end });
    }

    let length = (end - start).num_days() + 1;
    let fertile_window = FertileWindow {
        start_day: 1.max(length - 18),
        end_day: length.min(length - 11),
    };

    tracing::debug!(
        "Computed cycle {}: {} to {} ({} days, fertile {})",
        id,
        start,
        end,
        length,
        fertile_window
    );

    Ok(CycleRecord {
        id,
        start,
        end,
        length,
        fertile_window,
    })
}

/// 1-based day offset of a date within a cycle starting at `cycle_start`
pub fn day_in_cycle(cycle_start: NaiveDate, date: NaiveDate) -> i64 {
    (date - cycle_start).num_days() + 1
}

/// Aggregate statistics over the logged cycle history
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleStats {
    pub count: usize,
    pub average_length: f64,
    pub shortest: i64,
    pub longest: i64,
}

/// Summarize cycle history; None when no cycles are logged
pub fn cycle_stats(cycles: &[CycleRecord]) -> Option<CycleStats> {
    if cycles.is_empty() {
        return None;
    }

    let lengths: Vec<i64> = cycles.iter().map(|c| c.length).collect();
    let total: i64 = lengths.iter().sum();

    Some(CycleStats {
        count: cycles.len(),
        average_length: total as f64 / cycles.len() as f64,
        shortest: *lengths.iter().min().unwrap_or(&0),
        longest: *lengths.iter().max().unwrap_or(&0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_standard_cycle() {
        let record = compute_cycle(1, date(2024, 1, 1), date(2024, 1, 28)).unwrap();
        assert_eq!(record.length, 28);
        assert_eq!(record.fertile_window.start_day, 10);
        assert_eq!(record.fertile_window.end_day, 17);
        assert_eq!(record.fertile_window.to_string(), "10-17");
    }

    #[test]
    fn test_length_is_inclusive_day_count() {
        let record = compute_cycle(1, date(2024, 3, 1), date(2024, 3, 2)).unwrap();
        assert_eq!(record.length, 2);
    }

    #[test]
    fn test_fertile_start_clamped_to_one() {
        // Length 15: start = max(1, -3) = 1, end = 15 - 11 = 4
        let record = compute_cycle(1, date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        assert_eq!(record.fertile_window.start_day, 1);
        assert_eq!(record.fertile_window.end_day, 4);
    }

    #[test]
    fn test_short_cycle_yields_empty_window() {
        // Length 5: end_day = -6 < start_day, so no day is fertile
        let record = compute_cycle(1, date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        assert!(record.fertile_window.end_day < record.fertile_window.start_day);
        for day in 1..=record.length {
            assert!(!record.fertile_window.contains(day));
        }
    }

    #[test]
    fn test_window_bounds_for_valid_lengths() {
        for len in 12..60 {
            let end = date(2024, 1, 1) + chrono::Duration::days(len - 1);
            let record = compute_cycle(1, date(2024, 1, 1), end).unwrap();
            let w = record.fertile_window;
            assert!(1 <= w.start_day, "length {}: start {}", len, w.start_day);
            assert!(w.start_day <= w.end_day, "length {}", len);
            assert!(w.end_day <= record.length, "length {}", len);
        }
    }

    #[test]
    fn test_start_equal_end_rejected() {
        let result = compute_cycle(1, date(2024, 1, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let result = compute_cycle(1, date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_day_in_cycle() {
        assert_eq!(day_in_cycle(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(day_in_cycle(date(2024, 1, 1), date(2024, 1, 14)), 14);
        assert_eq!(day_in_cycle(date(2024, 1, 10), date(2024, 1, 5)), -4);
    }

    #[test]
    fn test_cycle_stats() {
        let cycles = vec![
            compute_cycle(1, date(2024, 1, 1), date(2024, 1, 28)).unwrap(),
            compute_cycle(2, date(2024, 2, 1), date(2024, 3, 1)).unwrap(),
        ];
        let stats = cycle_stats(&cycles).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.shortest, 28);
        assert_eq!(stats.longest, 30);
        assert!((stats.average_length - 29.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_stats_empty() {
        assert!(cycle_stats(&[]).is_none());
    }
}
