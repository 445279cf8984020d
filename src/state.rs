use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::color::YearColors;
use crate::data::error::DataError;
use crate::data::filter::{
    filter_by_week_range, filter_by_year, period_totals, split_two_periods, summarize_by_period_week,
    summarize_by_region, summarize_by_region_year, PeriodTotals,
};
use crate::data::model::{Period, RegionRecord, WeekRecord};
use crate::data::DataContext;

// ---------------------------------------------------------------------------
// Selection – what the controls currently ask for
// ---------------------------------------------------------------------------

/// Control values. Indices address the weekly series; ranges are end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub week_start: usize,
    pub week_end: usize,
    /// `[i0, i1)` is period A, `[i1, i2)` is period B.
    pub period_bounds: [usize; 3],
}

impl Selection {
    /// Earliest year selected, whole series in range, series halved for the
    /// comparison.
    pub fn initial(data: &DataContext) -> Self {
        let len = data.week_count();
        Self {
            years: data.years().iter().next().copied().into_iter().collect(),
            week_start: 0,
            week_end: len,
            period_bounds: [0, len / 2, len],
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views – recomputed whenever the selection changes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Views {
    pub regions: Vec<RegionRecord>,
    /// Region order for the bar chart (largest total first).
    pub region_order: Vec<String>,
    pub region_summary: BTreeMap<(String, i32), f64>,
    pub weeks: Vec<WeekRecord>,
    pub period_summary: BTreeMap<(Period, NaiveDate), f64>,
    pub period_totals: Option<PeriodTotals>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub data: DataContext,
    pub selection: Selection,
    pub views: Views,
    pub year_colors: YearColors,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    /// Selection the views were last computed for.
    computed_for: Option<Selection>,
}

impl AppState {
    pub fn new(data: DataContext) -> Self {
        let mut state = Self {
            selection: Selection::initial(&data),
            year_colors: YearColors::new(data.years()),
            data,
            views: Views::default(),
            status_message: None,
            computed_for: None,
        };
        state.recompute();
        state
    }

    /// Swap in a freshly loaded data context and reset the controls.
    pub fn set_data(&mut self, data: DataContext) {
        *self = Self::new(data);
    }

    /// Recompute the views if the selection changed since the last call.
    ///
    /// Query errors stay local: the message goes to the status line and the
    /// affected view is emptied.
    pub fn recompute(&mut self) {
        if self.computed_for.as_ref() == Some(&self.selection) {
            return;
        }
        let selection = self.selection.clone();
        let years: Vec<i32> = selection.years.iter().copied().collect();

        let regions = filter_by_year(&self.data.regions, &years);
        self.views.region_summary = summarize_by_region_year(regions.iter().copied());
        self.views.region_order = summarize_by_region(regions.iter().copied())
            .into_iter()
            .map(|(region, _)| region)
            .collect();
        self.views.regions = regions.into_iter().cloned().collect();

        let mut errors: Vec<DataError> = Vec::new();

        match filter_by_week_range(&self.data.weeks, selection.week_start, selection.week_end) {
            Ok(weeks) => self.views.weeks = weeks.to_vec(),
            Err(e) => {
                self.views.weeks.clear();
                errors.push(e);
            }
        }

        let [i0, i1, i2] = selection.period_bounds;
        match split_two_periods(&self.data.weeks, i0, i1, i2) {
            Ok((a, b)) => {
                self.views.period_summary = summarize_by_period_week(a.iter().chain(&b));
                self.views.period_totals = Some(period_totals(&a, &b));
            }
            Err(e) => {
                self.views.period_summary.clear();
                self.views.period_totals = None;
                errors.push(e);
            }
        }

        self.status_message = if errors.is_empty() {
            None
        } else {
            for e in &errors {
                log::warn!("{e}");
            }
            Some(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
        self.computed_for = Some(selection);
    }

    /// Toggle a single year in the selection.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
    }

    pub fn select_all_years(&mut self) {
        self.selection.years = self.data.years().clone();
    }

    pub fn select_no_years(&mut self) {
        self.selection.years.clear();
    }

    /// Label for a week index, used by the sliders. `len` reads as "end".
    pub fn week_label(&self, index: usize) -> String {
        match self.data.weeks.get(index) {
            Some(w) => w.week.format("%Y-%m-%d").to_string(),
            None => "end".to_string(),
        }
    }
}
