//! Selection filtering.
//!
//! The policy is a four-row decision table over the two dimensions:
//!
//! | region   | country  | rows kept                              |
//! |----------|----------|----------------------------------------|
//! | all      | all      | every row                              |
//! | selected | all      | region in selection                    |
//! | all      | selected | country in selection                   |
//! | selected | selected | region in selection **and** country in selection |
//!
//! Selecting both a region and a country list intersects them; it never unions.
use crate::dataset::Dataset;
use crate::models::{CaseRecord, DimensionFilter, Selection};

/// Rows of `data` admitted by `selection`, in dataset order.
pub fn filter<'a>(data: &'a Dataset, selection: &Selection) -> Vec<&'a CaseRecord> {
    filter_records(data.records(), selection)
}

/// Same as [`filter`] for callers holding a plain slice.
pub fn filter_records<'a>(records: &'a [CaseRecord], selection: &Selection) -> Vec<&'a CaseRecord> {
    use DimensionFilter::{All, Only};

    let regions = selection.region_filter();
    let countries = selection.country_filter();

    match (regions, countries) {
        (All, All) => records.iter().collect(),
        (Only(_), All) => records
            .iter()
            .filter(|r| regions.admits(&r.who_region))
            .collect(),
        (All, Only(_)) => records
            .iter()
            .filter(|r| countries.admits(&r.country))
            .collect(),
        (Only(_), Only(_)) => records
            .iter()
            .filter(|r| regions.admits(&r.who_region) && countries.admits(&r.country))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ALL_COUNTRIES, ALL_REGIONS};

    fn rows() -> Vec<CaseRecord> {
        vec![
            CaseRecord::new("US", "Americas", 100, 10, 80),
            CaseRecord::new("France", "Europe", 50, 5, 40),
            CaseRecord::new("Brazil", "Americas", 70, 7, 60),
        ]
    }

    #[test]
    fn region_only_ignores_country_dimension() {
        let data = rows();
        let sel = Selection::new(["Americas"], [ALL_COUNTRIES, "France"]);
        let got: Vec<&str> = filter_records(&data, &sel)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(got, vec!["US", "Brazil"]);
    }

    #[test]
    fn both_selected_is_intersection_not_union() {
        let data = rows();
        let sel = Selection::new(["Americas"], ["France", "Brazil"]);
        let got: Vec<&str> = filter_records(&data, &sel)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(got, vec!["Brazil"]);
    }

    #[test]
    fn cleared_country_list_keeps_nothing() {
        let data = rows();
        let sel = Selection::new([ALL_REGIONS], Vec::<String>::new());
        assert!(filter_records(&data, &sel).is_empty());
    }
}
