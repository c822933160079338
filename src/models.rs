use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel label that disables filtering on the region dimension.
pub const ALL_REGIONS: &str = "All Regions";
/// Sentinel label that disables filtering on the country dimension.
pub const ALL_COUNTRIES: &str = "All Countries";

/// Column names of the source table, exactly as existing exports spell them.
pub mod columns {
    pub const COUNTRY: &str = "Country/Region";
    pub const CONFIRMED: &str = "Confirmed";
    pub const DEATHS: &str = "Deaths";
    pub const RECOVERED: &str = "Recovered";
    pub const WHO_REGION: &str = "WHO Region";

    /// Every column a source must carry.
    pub const REQUIRED: [&str; 5] = [COUNTRY, CONFIRMED, DEATHS, RECOVERED, WHO_REGION];
}

/// One row of the snapshot: cumulative counts for a single country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CaseRecord {
    #[serde(rename = "Country/Region")]
    pub country: String,
    #[serde(rename = "Confirmed", deserialize_with = "de_count")]
    pub confirmed: u64,
    #[serde(rename = "Deaths", deserialize_with = "de_count")]
    pub deaths: u64,
    #[serde(rename = "Recovered", deserialize_with = "de_count")]
    pub recovered: u64,
    #[serde(rename = "WHO Region")]
    pub who_region: String,
}

impl CaseRecord {
    pub fn new(
        country: impl Into<String>,
        who_region: impl Into<String>,
        confirmed: u64,
        deaths: u64,
        recovered: u64,
    ) -> Self {
        Self {
            country: country.into(),
            confirmed,
            deaths,
            recovered,
            who_region: who_region.into(),
        }
    }

    /// Cases neither fatal nor recovered. Negative when the source over-reports
    /// deaths + recovered; the value is never clamped.
    pub fn residual(&self) -> i128 {
        i128::from(self.confirmed) - i128::from(self.deaths) - i128::from(self.recovered)
    }

    /// `deaths + recovered <= confirmed`.
    pub fn is_consistent(&self) -> bool {
        self.residual() >= 0
    }
}

/// Largest count the loader accepts.
pub const MAX_COUNT: u64 = i64::MAX as u64;

/// Serde helper: parse a count in `0..=MAX_COUNT` from an integer, an integral
/// float (`"120.0"`, as spreadsheet round-trips tend to write), or a numeric string.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a non-negative integer count")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v > MAX_COUNT {
                return Err(E::custom(format!("count out of range: {v}")));
            }
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = u64::try_from(v).map_err(|_| E::custom(format!("negative count: {v}")))?;
            self.visit_u64(v)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // `MAX_COUNT as f64` rounds up to 2^63, hence the strict bound
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < MAX_COUNT as f64 {
                Ok(v as u64)
            } else {
                Err(E::custom(format!("not a non-negative integer count: {v}")))
            }
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(v) => self.visit_u64(v),
                Err(_) => match s.parse::<f64>() {
                    Ok(f) => self.visit_f64(f),
                    Err(_) => Err(E::custom(format!("invalid count: {s:?}"))),
                },
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// Active filter on one dimension of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionFilter<'a> {
    /// Wildcard: every label passes.
    All,
    /// Only these labels pass. An empty set lets nothing through.
    Only(&'a BTreeSet<String>),
}

impl DimensionFilter<'_> {
    pub fn admits(&self, label: &str) -> bool {
        match self {
            DimensionFilter::All => true,
            DimensionFilter::Only(set) => set.contains(label),
        }
    }
}

/// The user's region/country choice for one evaluation.
///
/// A dimension whose set contains its sentinel ([`ALL_REGIONS`] /
/// [`ALL_COUNTRIES`]) is not filtered, whatever else the set holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub regions: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl Selection {
    pub fn new<R, C>(regions: R, countries: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            countries: countries.into_iter().map(Into::into).collect(),
        }
    }

    /// Both dimensions wildcarded.
    pub fn all() -> Self {
        Self::new([ALL_REGIONS], [ALL_COUNTRIES])
    }

    pub fn region_filter(&self) -> DimensionFilter<'_> {
        dimension(&self.regions, ALL_REGIONS)
    }

    pub fn country_filter(&self) -> DimensionFilter<'_> {
        dimension(&self.countries, ALL_COUNTRIES)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

fn dimension<'a>(set: &'a BTreeSet<String>, sentinel: &str) -> DimensionFilter<'a> {
    if set.contains(sentinel) {
        DimensionFilter::All
    } else {
        DimensionFilter::Only(set)
    }
}
