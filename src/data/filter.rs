use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::error::DataError;
use super::model::{Period, PeriodWeekRecord, RegionRecord, WeekRecord};

// ---------------------------------------------------------------------------
// Region snapshots
// ---------------------------------------------------------------------------

/// Records whose year is one of `years`, in table order.
///
/// An empty selection selects nothing.
pub fn filter_by_year<'a>(table: &'a [RegionRecord], years: &[i32]) -> Vec<&'a RegionRecord> {
    table.iter().filter(|r| years.contains(&r.year)).collect()
}

/// Total search volume per `(region, year)`, keyed in ascending order.
pub fn summarize_by_region_year<'a, I>(records: I) -> BTreeMap<(String, i32), f64>
where
    I: IntoIterator<Item = &'a RegionRecord>,
{
    let mut summary = BTreeMap::new();
    for r in records {
        *summary.entry((r.region.clone(), r.year)).or_insert(0.0) += r.search_volume;
    }
    summary
}

/// Total search volume per region, largest first. Ties keep name order.
pub fn summarize_by_region<'a, I>(records: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a RegionRecord>,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.region.as_str()).or_insert(0.0) += r.search_volume;
    }
    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(region, total)| (region.to_string(), total))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

// ---------------------------------------------------------------------------
// Weekly series
// ---------------------------------------------------------------------------

/// Rows `[start, end)` of the weekly series.
///
/// Fails unless `start < table.len()` and `start <= end <= table.len()`;
/// indices are never clamped.
pub fn filter_by_week_range(
    table: &[WeekRecord],
    start: usize,
    end: usize,
) -> Result<&[WeekRecord], DataError> {
    check_bounds(&[start, end], table.len())?;
    Ok(&table[start..end])
}

/// Split `[i0, i2)` into period A `[i0, i1)` and period B `[i1, i2)`.
///
/// The boundary row `i1` belongs to period B only. Fails unless
/// `i0 < table.len()` and `i0 <= i1 <= i2 <= table.len()`.
pub fn split_two_periods(
    table: &[WeekRecord],
    i0: usize,
    i1: usize,
    i2: usize,
) -> Result<(Vec<PeriodWeekRecord>, Vec<PeriodWeekRecord>), DataError> {
    check_bounds(&[i0, i1, i2], table.len())?;

    let tag = |rows: &[WeekRecord], period: Period| -> Vec<PeriodWeekRecord> {
        rows.iter()
            .map(|w| PeriodWeekRecord {
                period,
                week: w.week,
                search_volume: w.search_volume,
            })
            .collect()
    };

    Ok((tag(&table[i0..i1], Period::A), tag(&table[i1..i2], Period::B)))
}

/// Total search volume per `(period, week)`, keyed in ascending order.
pub fn summarize_by_period_week<'a, I>(records: I) -> BTreeMap<(Period, NaiveDate), f64>
where
    I: IntoIterator<Item = &'a PeriodWeekRecord>,
{
    let mut summary = BTreeMap::new();
    for r in records {
        *summary.entry((r.period, r.week)).or_insert(0.0) += r.search_volume;
    }
    summary
}

/// Headline numbers for a two-period comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTotals {
    pub total_a: f64,
    pub total_b: f64,
    pub mean_a: Option<f64>,
    pub mean_b: Option<f64>,
    /// Relative change of B's mean against A's, e.g. `0.25` for +25 %.
    /// `None` when either period is empty or A's mean is zero.
    pub change: Option<f64>,
}

pub fn period_totals(a: &[PeriodWeekRecord], b: &[PeriodWeekRecord]) -> PeriodTotals {
    let stats = |rows: &[PeriodWeekRecord]| {
        let total: f64 = rows.iter().map(|r| r.search_volume).sum();
        let mean = (!rows.is_empty()).then(|| total / rows.len() as f64);
        (total, mean)
    };
    let (total_a, mean_a) = stats(a);
    let (total_b, mean_b) = stats(b);

    let change = match (mean_a, mean_b) {
        (Some(ma), Some(mb)) if ma != 0.0 => Some((mb - ma) / ma),
        _ => None,
    };

    PeriodTotals {
        total_a,
        total_b,
        mean_a,
        mean_b,
        change,
    }
}

/// Per-period series keyed by week offset from the period start, for
/// overlaying B on A.
pub fn aligned_by_offset(
    summary: &BTreeMap<(Period, NaiveDate), f64>,
) -> HashMap<Period, Vec<(usize, f64)>> {
    let mut out: HashMap<Period, Vec<(usize, f64)>> = HashMap::new();
    for (&(period, _week), &volume) in summary {
        let series = out.entry(period).or_default();
        series.push((series.len(), volume));
    }
    out
}

/// Bounds must be non-decreasing, start inside `[0, len)` and end at most `len`.
fn check_bounds(bounds: &[usize], len: usize) -> Result<(), DataError> {
    let (Some(&first), Some(&last)) = (bounds.first(), bounds.last()) else {
        return Ok(());
    };
    let ordered = bounds.windows(2).all(|w| w[0] <= w[1]);
    if !ordered || first >= len || last > len {
        return Err(DataError::OutOfRange {
            start: first,
            end: last,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(region: &str, year: i32, volume: f64) -> RegionRecord {
        RegionRecord {
            region: region.into(),
            search_volume: volume,
            year,
        }
    }

    fn weeks(n: usize) -> Vec<WeekRecord> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        (0..n)
            .map(|i| WeekRecord {
                week: start + chrono::Duration::weeks(i as i64),
                search_volume: (i as f64 + 1.0) * 10.0,
            })
            .collect()
    }

    #[test]
    fn filter_by_year_keeps_selected_years_in_order() {
        let table = vec![
            region("A", 2019, 1.0),
            region("B", 2020, 2.0),
            region("C", 2021, 3.0),
            region("D", 2020, 4.0),
            region("E", 2022, 5.0),
        ];

        let picked: Vec<&str> = filter_by_year(&table, &[2020, 2021])
            .into_iter()
            .map(|r| r.region.as_str())
            .collect();

        assert_eq!(picked, vec!["B", "C", "D"]);
        assert!(filter_by_year(&table, &[]).is_empty());
        assert_eq!(filter_by_year(&table, &[2019]).len(), 1);
    }

    #[test]
    fn summarize_by_region_year_sums_duplicates() {
        let rows = vec![region("A", 2020, 10.0), region("A", 2020, 5.0), region("B", 2020, 3.0)];

        let summary = summarize_by_region_year(&rows);

        let expected: BTreeMap<(String, i32), f64> =
            [(("A".to_string(), 2020), 15.0), (("B".to_string(), 2020), 3.0)]
                .into_iter()
                .collect();
        assert_eq!(summary, expected);
    }

    #[test]
    fn summarize_by_region_year_orders_by_region_then_year() {
        let rows = vec![region("B", 2021, 1.0), region("A", 2021, 1.0), region("A", 2019, 1.0)];
        let keys: Vec<(String, i32)> = summarize_by_region_year(&rows).into_keys().collect();
        assert_eq!(
            keys,
            vec![("A".into(), 2019), ("A".into(), 2021), ("B".into(), 2021)]
        );
    }

    #[test]
    fn summarize_by_region_ranks_largest_first() {
        let rows = vec![region("A", 2020, 1.0), region("B", 2020, 4.0), region("A", 2021, 2.0)];
        assert_eq!(
            summarize_by_region(&rows),
            vec![("B".to_string(), 4.0), ("A".to_string(), 3.0)]
        );
    }

    #[test]
    fn week_range_is_end_exclusive() {
        let table = weeks(5);
        let picked = filter_by_week_range(&table, 0, 2).unwrap();
        assert_eq!(picked, &table[0..2]);
        assert_eq!(filter_by_week_range(&table, 0, 5).unwrap().len(), 5);
        assert!(filter_by_week_range(&table, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn week_range_rejects_bad_indices() {
        let table = weeks(5);
        assert!(matches!(
            filter_by_week_range(&table, 0, 6),
            Err(DataError::OutOfRange { start: 0, end: 6, len: 5 })
        ));
        assert!(matches!(
            filter_by_week_range(&table, 4, 2),
            Err(DataError::OutOfRange { .. })
        ));
    }

    #[test]
    fn split_two_periods_has_no_gap_or_overlap() {
        let table = weeks(5);

        let (a, b) = split_two_periods(&table, 0, 2, 4).unwrap();

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert!(a.iter().all(|r| r.period == Period::A));
        assert!(b.iter().all(|r| r.period == Period::B));
        let covered: Vec<NaiveDate> = a.iter().chain(&b).map(|r| r.week).collect();
        let expected: Vec<NaiveDate> = table[0..4].iter().map(|w| w.week).collect();
        assert_eq!(covered, expected);
    }

    #[test]
    fn week_range_rejects_start_at_len() {
        let table = weeks(5);
        assert!(matches!(
            filter_by_week_range(&table, 5, 5),
            Err(DataError::OutOfRange { start: 5, end: 5, len: 5 })
        ));
        assert!(matches!(
            filter_by_week_range(&[], 0, 0),
            Err(DataError::OutOfRange { len: 0, .. })
        ));
        assert_eq!(filter_by_week_range(&table, 4, 5).unwrap().len(), 1);
    }

    #[test]
    fn split_rejects_start_at_len() {
        let table = weeks(5);
        assert!(matches!(
            split_two_periods(&table, 5, 5, 5),
            Err(DataError::OutOfRange { start: 5, end: 5, len: 5 })
        ));
        assert!(split_two_periods(&[], 0, 0, 0).is_err());
        let (a, b) = split_two_periods(&table, 4, 4, 5).unwrap();
        assert!(a.is_empty());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn split_two_periods_rejects_unordered_bounds() {
        let table = weeks(5);
        assert!(split_two_periods(&table, 0, 3, 2).is_err());
        assert!(split_two_periods(&table, 0, 2, 6).is_err());
        assert!(split_two_periods(&table, 2, 2, 2).unwrap().0.is_empty());
    }

    #[test]
    fn summarize_by_period_week_groups_per_period() {
        let table = weeks(4);
        let (a, b) = split_two_periods(&table, 0, 2, 4).unwrap();

        let summary = summarize_by_period_week(a.iter().chain(&b));

        assert_eq!(summary.len(), 4);
        assert_eq!(summary[&(Period::A, table[0].week)], 10.0);
        assert_eq!(summary[&(Period::B, table[3].week)], 40.0);
        let first = summary.keys().next().unwrap();
        assert_eq!(first.0, Period::A);
    }

    #[test]
    fn period_totals_and_offsets() {
        let table = weeks(4);
        let (a, b) = split_two_periods(&table, 0, 2, 4).unwrap();

        let totals = period_totals(&a, &b);
        assert_eq!(totals.total_a, 30.0);
        assert_eq!(totals.total_b, 70.0);
        assert_eq!(totals.mean_a, Some(15.0));
        let change = totals.change.unwrap();
        assert!((change - (35.0 - 15.0) / 15.0).abs() < 1e-9);

        let aligned = aligned_by_offset(&summarize_by_period_week(a.iter().chain(&b)));
        assert_eq!(aligned[&Period::B], vec![(0, 30.0), (1, 40.0)]);
    }

    #[test]
    fn period_totals_of_empty_period() {
        let totals = period_totals(&[], &[]);
        assert_eq!(totals.total_a, 0.0);
        assert_eq!(totals.mean_b, None);
        assert_eq!(totals.change, None);
    }
}
