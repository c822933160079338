//! Chart-ready projections of the engine output.
//!
//! Nothing here draws anything; these are the series a bar chart, heatmap,
//! donut or choropleth would be fed.
use crate::dataset::Dataset;
use crate::models::{CaseRecord, columns};
use crate::stats::Metrics;
use serde::Serialize;

/// Columns shown in the per-country table, in display order.
pub const TABLE_COLUMNS: [&str; 5] = [
    columns::COUNTRY,
    columns::CONFIRMED,
    columns::DEATHS,
    columns::RECOVERED,
    columns::WHO_REGION,
];

/// Which count a per-country series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Confirmed,
    Deaths,
    Recovered,
}

impl Measure {
    /// Source column label for this measure.
    pub fn label(self) -> &'static str {
        match self {
            Measure::Confirmed => columns::CONFIRMED,
            Measure::Deaths => columns::DEATHS,
            Measure::Recovered => columns::RECOVERED,
        }
    }

    pub fn of(self, record: &CaseRecord) -> u64 {
        match self {
            Measure::Confirmed => record.confirmed,
            Measure::Deaths => record.deaths,
            Measure::Recovered => record.recovered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub country: String,
    pub value: u64,
}

/// One bar per row, in input order.
pub fn series<'a, I>(rows: I, measure: Measure) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    rows.into_iter()
        .map(|r| SeriesPoint {
            country: r.country.clone(),
            value: measure.of(r),
        })
        .collect()
}

/// One shaded country on the map, with the counts shown on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapPoint {
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// The choropleth shades every country, whatever the current selection.
pub fn choropleth_source(data: &Dataset) -> Vec<MapPoint> {
    data.iter()
        .map(|r| MapPoint {
            country: r.country.clone(),
            confirmed: r.confirmed,
            deaths: r.deaths,
            recovered: r.recovered,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub percent: f64,
}

/// Donut slices `Deaths`, `Recovered`, `Unknown`; `None` when shares are undefined.
pub fn breakdown(metrics: &Metrics) -> Option<[Slice; 3]> {
    let s = metrics.shares?;
    Some([
        Slice {
            label: "Deaths",
            percent: s.deaths,
        },
        Slice {
            label: "Recovered",
            percent: s.recovered,
        },
        Slice {
            label: "Unknown",
            percent: s.unknown,
        },
    ])
}
