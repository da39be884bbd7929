//! Filter-aggregate engine
//!
//! One call to [`Engine::run`] is one dashboard interaction: filters and
//! drill-down selection in, rows, chart totals and metric cards out. The
//! dataset is only borrowed, so repeated runs against the same session are
//! independent of each other.
//!
//! Row sets, narrowest last:
//! - period rows: the selected year/month
//! - sidebar rows: period rows passing amount, search, provider and category
//! - category scope: sidebar rows in the selected category bar, if any
//! - view rows: category scope rows of the selected provider bar, if any

use tracing::debug;

use crate::aggregate::group_totals;
use crate::config::MetricsScope;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{apply, FilterConfig};
use crate::metrics::summarize;
use crate::models::{DashboardView, EnrichedTransaction};

pub struct Engine<'a> {
    dataset: &'a Dataset,
    metrics_scope: MetricsScope,
}

impl<'a> Engine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            metrics_scope: MetricsScope::default(),
        }
    }

    pub fn with_metrics_scope(mut self, scope: MetricsScope) -> Self {
        self.metrics_scope = scope;
        self
    }

    /// Run one interaction
    ///
    /// Fails with `InvalidRange` for reversed amount bounds and with
    /// `InvalidInput` for a year/month absent from the dataset. An empty
    /// result is not an error.
    pub fn run(&self, filters: &FilterConfig) -> Result<DashboardView> {
        filters.validate()?;
        self.dataset.check_period(filters.period)?;

        let labels = self.dataset.labels();

        let period_rows: Vec<&EnrichedTransaction> =
            self.dataset.period_rows(filters.period).collect();

        // period predicate included, already satisfied here
        let sidebar_rows = apply(
            period_rows.iter().copied(),
            &filters.sidebar_predicates(),
            labels,
        );

        let category_scope = match filters.category_selection() {
            Some(p) => apply(sidebar_rows.iter().copied(), &[p], labels),
            None => sidebar_rows.clone(),
        };

        let view_rows = match filters.provider_selection() {
            Some(p) => apply(category_scope.iter().copied(), &[p], labels),
            None => category_scope.clone(),
        };

        debug!(
            period = %filters.period,
            period_rows = period_rows.len(),
            sidebar_rows = sidebar_rows.len(),
            category_scope = category_scope.len(),
            view_rows = view_rows.len(),
            "Filter pass complete"
        );

        let summary = match self.metrics_scope {
            MetricsScope::Period => summarize(period_rows.iter().copied(), labels),
            MetricsScope::Filtered => summarize(sidebar_rows.iter().copied(), labels),
        };

        let category_totals = group_totals(view_rows.iter().copied(), |r| r.category.as_str());
        let provider_totals = group_totals(category_scope.iter().copied(), |r| {
            r.provider_or(&labels.missing_provider)
        });

        Ok(DashboardView {
            period: filters.period,
            rows: view_rows.into_iter().cloned().collect(),
            category_totals,
            provider_totals,
            summary,
        })
    }
}
