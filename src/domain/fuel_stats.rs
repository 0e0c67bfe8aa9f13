//! Derived fuel statistics

use super::car::FuelEntry;

/// Aggregated consumption figures for one car. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelStats {
    pub total_fuel: f64,
    pub total_cost: f64,
    /// Liters per 100 km, `0.0` when it cannot be determined
    pub avg_consumption: f64,
    pub entries_count: usize,
}

impl FuelStats {
    pub fn from_entries(entries: &[FuelEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total_fuel = compensated_sum(entries.iter().map(|e| e.liters));
        let total_cost = compensated_sum(entries.iter().map(|e| e.price));

        let avg_consumption = match distance_by_timestamp(entries) {
            Some(distance) if distance > 0 => (total_fuel / distance as f64) * 100.0,
            _ => 0.0,
        };

        Self {
            total_fuel,
            total_cost,
            avg_consumption,
            entries_count: entries.len(),
        }
    }
}

/// Kahan summation, so totals like `0.1 + 0.2 + 0.3` come out as `0.6`.
///
/// Falls back to the naive sum when compensation produces NaN from
/// infinite inputs.
pub fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    let mut simple = 0.0_f64;

    for value in values {
        simple += value;
        let adjusted = value - compensation;
        let next = sum + adjusted;
        compensation = (next - sum) - adjusted;
        sum = next;
    }

    let total = sum - compensation;
    if total.is_nan() && simple.is_infinite() {
        simple
    } else {
        total
    }
}

/// Odometer distance between the earliest and latest entry by timestamp.
///
/// The sort is stable, so entries sharing a timestamp keep insertion order.
/// Returns `None` with fewer than two entries. The result may be zero or
/// negative when timestamps and odometer readings disagree.
pub fn distance_by_timestamp(entries: &[FuelEntry]) -> Option<i64> {
    if entries.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&FuelEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let first = sorted.first()?.odometer;
    let last = sorted.last()?.odometer;
    Some(last - first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn entry(id: i64, liters: f64, price: f64, odometer: i64, minute: i64) -> FuelEntry {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        FuelEntry {
            id,
            liters,
            price,
            odometer,
            timestamp: base + Duration::minutes(minute),
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = FuelStats::from_entries(&[]);
        assert_eq!(stats, FuelStats::default());
        assert_eq!(stats.entries_count, 0);
    }

    #[test]
    fn single_entry_has_totals_but_no_consumption() {
        let stats = FuelStats::from_entries(&[entry(1, 40.0, 52.5, 45_000, 0)]);
        assert_eq!(stats.entries_count, 1);
        assert_eq!(stats.total_fuel, 40.0);
        assert_eq!(stats.total_cost, 52.5);
        assert_eq!(stats.avg_consumption, 0.0);
    }

    #[test]
    fn corolla_scenario() {
        let entries = [
            entry(1, 40.0, 52.5, 45_000, 0),
            entry(2, 35.0, 48.0, 45_500, 10),
        ];
        let stats = FuelStats::from_entries(&entries);
        assert_eq!(stats.total_fuel, 75.0);
        assert_eq!(stats.total_cost, 100.5);
        assert_eq!(stats.entries_count, 2);
        assert!((stats.avg_consumption - 15.0).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_yields_zero_consumption() {
        let entries = [
            entry(1, 40.0, 50.0, 45_000, 0),
            entry(2, 10.0, 12.0, 45_000, 5),
        ];
        let stats = FuelStats::from_entries(&entries);
        assert_eq!(stats.avg_consumption, 0.0);
        assert_eq!(stats.total_fuel, 50.0);
    }

    #[test]
    fn totals_use_compensated_summation() {
        let entries = [
            entry(1, 0.1, 0.1, 0, 0),
            entry(2, 0.2, 0.2, 100, 1),
            entry(3, 0.3, 0.3, 200, 2),
        ];
        let stats = FuelStats::from_entries(&entries);
        assert_eq!(stats.total_fuel, 0.6);
        assert_eq!(stats.total_cost, 0.6);
        assert_eq!(stats.avg_consumption, 0.6 / 200.0 * 100.0);

        assert_eq!(compensated_sum(std::iter::repeat(0.1).take(10)), 1.0);
        assert_eq!(compensated_sum([]), 0.0);
        assert_eq!(compensated_sum([f64::INFINITY, 1.0]), f64::INFINITY);
    }

    #[test]
    fn ordering_follows_timestamps_not_insertion() {
        // Inserted out of time order: the earliest entry by timestamp has the
        // highest odometer, so the timestamp-ordered distance is negative.
        let entries = [
            entry(1, 30.0, 40.0, 46_000, 0),
            entry(2, 30.0, 40.0, 45_000, 10),
        ];
        assert_eq!(distance_by_timestamp(&entries), Some(-1_000));
        assert_eq!(FuelStats::from_entries(&entries).avg_consumption, 0.0);

        let reordered = [
            entry(1, 30.0, 40.0, 45_000, 10),
            entry(2, 30.0, 40.0, 46_000, 0),
        ];
        assert_eq!(distance_by_timestamp(&reordered), Some(-1_000));
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let entries = [
            entry(1, 20.0, 30.0, 10_000, 0),
            entry(2, 20.0, 30.0, 10_200, 0),
            entry(3, 20.0, 30.0, 10_400, 0),
        ];
        assert_eq!(distance_by_timestamp(&entries), Some(400));
        let stats = FuelStats::from_entries(&entries);
        assert!((stats.avg_consumption - 15.0).abs() < 1e-9);
    }

    #[test]
    fn consumption_uses_all_fuel_over_first_to_last_distance() {
        let entries = [
            entry(1, 50.0, 70.0, 0, 0),
            entry(2, 30.0, 42.0, 300, 1),
            entry(3, 20.0, 28.0, 1_000, 2),
        ];
        let stats = FuelStats::from_entries(&entries);
        assert!((stats.avg_consumption - 10.0).abs() < 1e-9);
        assert_eq!(distance_by_timestamp(&entries[..1]), None);
    }
}
