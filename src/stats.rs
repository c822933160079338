use crate::models::CaseRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome shares of the confirmed total, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Shares {
    pub deaths: f64,
    pub recovered: f64,
    /// Residual share; negative when deaths + recovered exceed confirmed.
    pub unknown: f64,
}

/// Totals and shares over a set of rows.
///
/// `shares` is `None` when `total_confirmed == 0`: the percentages are
/// undefined and callers decide how to show that (e.g. "N/A"). Totals are
/// 128-bit so summing any number of `u64` counts stays exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub total_confirmed: u128,
    pub total_deaths: u128,
    pub total_recovered: u128,
    /// `confirmed - deaths - recovered`, passed through unclamped.
    pub total_unknown: i128,
    pub shares: Option<Shares>,
}

impl Metrics {
    pub fn pct_deaths(&self) -> Option<f64> {
        self.shares.map(|s| s.deaths)
    }

    pub fn pct_recovered(&self) -> Option<f64> {
        self.shares.map(|s| s.recovered)
    }

    pub fn pct_unknown(&self) -> Option<f64> {
        self.shares.map(|s| s.unknown)
    }

    /// True when the source reports more resolved cases than confirmed ones.
    pub fn has_negative_residual(&self) -> bool {
        self.total_unknown < 0
    }
}

/// Sum the counts of `rows` and derive outcome shares.
pub fn aggregate<'a, I>(rows: I) -> Metrics
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let (mut confirmed, mut deaths, mut recovered) = (0u128, 0u128, 0u128);
    for r in rows {
        confirmed += u128::from(r.confirmed);
        deaths += u128::from(r.deaths);
        recovered += u128::from(r.recovered);
    }
    // each sum is below 2^64 * row count, far inside i128
    let total_unknown = confirmed as i128 - deaths as i128 - recovered as i128;

    let shares = if confirmed == 0 {
        None
    } else {
        let c = confirmed as f64;
        Some(Shares {
            deaths: 100.0 * deaths as f64 / c,
            recovered: 100.0 * recovered as f64 / c,
            unknown: 100.0 * total_unknown as f64 / c,
        })
    };

    Metrics {
        total_confirmed: confirmed,
        total_deaths: deaths,
        total_recovered: recovered,
        total_unknown,
        shares,
    }
}

/// Metrics for one WHO region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    pub countries: usize,
    pub metrics: Metrics,
}

/// Compute metrics per WHO region, sorted by region label.
pub fn grouped_by_region<'a, I>(rows: I) -> Vec<RegionSummary>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut groups: BTreeMap<&str, Vec<&CaseRecord>> = BTreeMap::new();
    for r in rows {
        groups.entry(r.who_region.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(region, members)| RegionSummary {
            region: region.to_string(),
            countries: members.len(),
            metrics: aggregate(members),
        })
        .collect()
}

/// Rows whose deaths + recovered exceed confirmed.
pub fn inconsistent_records<'a, I>(rows: I) -> Vec<&'a CaseRecord>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    rows.into_iter().filter(|r| !r.is_consistent()).collect()
}
