//! Dataset accessor: load the case snapshot once and expose it read-only.
//!
//! The input is a CSV table carrying at least the columns `Country/Region`,
//! `Confirmed`, `Deaths`, `Recovered` and `WHO Region`. Extra columns (the
//! usual exports also carry `Active`, `New cases`, ...) are ignored.
//!
//! ```no_run
//! # use covid_stats::dataset::{self, Dataset};
//! let data = Dataset::load("covid_data.csv")?;
//! let regions = dataset::distinct_regions(&data);
//! # Ok::<(), covid_stats::DataLoadError>(())
//! ```
use crate::error::{DataLoadError, Result};
use crate::models::{ALL_COUNTRIES, ALL_REGIONS, CaseRecord, columns};
use ahash::AHashSet;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Ordered, immutable sequence of case records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CaseRecord>,
}

impl Dataset {
    /// Load a snapshot from a CSV file. Fails as a whole on any problem.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_reader(file)?;
        log::debug!("loaded {} records from {}", data.len(), path.display());
        Ok(data)
    }

    /// Parse a snapshot from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        for required in columns::REQUIRED {
            if !headers.iter().any(|h| h == required) {
                return Err(DataLoadError::MissingColumn(required));
            }
        }

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<CaseRecord>().enumerate() {
            let record = row.map_err(|source| DataLoadError::Malformed {
                // header is line 1
                line: source
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(idx as u64 + 2),
                source,
            })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CaseRecord;
    type IntoIter = std::slice::Iter<'a, CaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Unique country labels in first-occurrence order.
pub fn distinct_countries(data: &Dataset) -> Vec<String> {
    distinct(data.iter().map(|r| r.country.as_str()))
}

/// Unique WHO region labels in first-occurrence order.
pub fn distinct_regions(data: &Dataset) -> Vec<String> {
    distinct(data.iter().map(|r| r.who_region.as_str()))
}

/// Choices for a region selector: the wildcard sentinel, then every region.
pub fn region_options(data: &Dataset) -> Vec<String> {
    with_sentinel(ALL_REGIONS, distinct_regions(data))
}

/// Choices for a country selector: the wildcard sentinel, then every country.
pub fn country_options(data: &Dataset) -> Vec<String> {
    with_sentinel(ALL_COUNTRIES, distinct_countries(data))
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    labels
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

fn with_sentinel(sentinel: &str, values: Vec<String>) -> Vec<String> {
    std::iter::once(sentinel.to_string()).chain(values).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keeps_first_occurrence_order() {
        let got = distinct(["b", "a", "b", "c", "a"].into_iter());
        assert_eq!(got, vec!["b", "a", "c"]);
    }

    #[test]
    fn options_start_with_sentinel() {
        let data = Dataset::from_records(vec![
            CaseRecord::new("US", "Americas", 1, 0, 0),
            CaseRecord::new("France", "Europe", 1, 0, 0),
        ]);
        assert_eq!(region_options(&data), vec![ALL_REGIONS, "Americas", "Europe"]);
        assert_eq!(country_options(&data), vec![ALL_COUNTRIES, "US", "France"]);
    }
}
