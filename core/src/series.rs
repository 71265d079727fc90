//! Chart series adapter
//!
//! Turns the service's unordered `date -> analytics` map into parallel label
//! and value arrays for the chart. Labels are ISO `YYYY-MM-DD` strings, so
//! lexicographic order is chronological order; the adapter relies on that and
//! does not parse dates.

use std::collections::HashMap;

use narrascope_types::PeriodAnalytics;

/// Chart-ready sentiment series. `labels[i]` pairs with `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Build the average-sentiment series.
///
/// Returns `None` ("no data") for an absent or empty map; callers render a
/// placeholder instead of handing empty arrays to the chart.
pub fn sentiment_series(
    analytics: Option<&HashMap<String, PeriodAnalytics>>,
) -> Option<ChartSeries> {
    let periods = sorted_periods(analytics);
    if periods.is_empty() {
        return None;
    }

    let (labels, values) = periods
        .into_iter()
        .map(|(date, period)| (date.to_string(), period.average_sentiment_score))
        .unzip();
    Some(ChartSeries { labels, values })
}

/// Periods in ascending date order, for tabular breakdowns.
pub fn sorted_periods(
    analytics: Option<&HashMap<String, PeriodAnalytics>>,
) -> Vec<(&str, &PeriodAnalytics)> {
    let mut periods: Vec<_> = analytics
        .into_iter()
        .flatten()
        .map(|(date, period)| (date.as_str(), period))
        .collect();
    periods.sort_unstable_by(|a, b| a.0.cmp(b.0));
    periods
}
