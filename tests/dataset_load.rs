use covid_stats::dataset::{self, Dataset};
use covid_stats::DataLoadError;
use std::io::Write;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/covid_sample.csv")
}

#[test]
fn loads_fixture_and_ignores_extra_columns() {
    let data = Dataset::load(fixture()).unwrap();
    assert_eq!(data.len(), 8);
    let us = data.iter().find(|r| r.country == "US").unwrap();
    assert_eq!(us.confirmed, 4_290_259);
    assert_eq!(us.deaths, 148_011);
    assert_eq!(us.recovered, 1_325_804);
    assert_eq!(us.who_region, "Americas");
}

#[test]
fn distinct_values_follow_first_occurrence() {
    let data = Dataset::load(fixture()).unwrap();
    assert_eq!(
        dataset::distinct_regions(&data),
        vec!["Eastern Mediterranean", "Europe", "Americas", "Western Pacific"]
    );
    let countries = dataset::distinct_countries(&data);
    assert_eq!(countries.len(), 8);
    assert_eq!(countries[0], "Afghanistan");
    assert_eq!(countries[7], "Overland");
}

#[test]
fn missing_file_is_io_error() {
    let err = Dataset::load("definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, DataLoadError::Io { .. }), "got {err:?}");
}

#[test]
fn missing_column_is_reported_by_name() {
    let src = "Country/Region,Confirmed,Deaths,WHO Region\nUS,1,0,Americas\n";
    let err = Dataset::from_reader(src.as_bytes()).unwrap_err();
    match err {
        DataLoadError::MissingColumn(col) => assert_eq!(col, "Recovered"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_source_has_no_columns() {
    let err = Dataset::from_reader("".as_bytes()).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingColumn(_)));
}

#[test]
fn malformed_count_fails_whole_load() {
    let src = "Country/Region,Confirmed,Deaths,Recovered,WHO Region\n\
               US,100,10,80,Americas\n\
               France,lots,5,40,Europe\n";
    let err = Dataset::from_reader(src.as_bytes()).unwrap_err();
    match err {
        DataLoadError::Malformed { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_count_is_malformed() {
    let src = "Country/Region,Confirmed,Deaths,Recovered,WHO Region\nUS,100,-1,80,Americas\n";
    let err = Dataset::from_reader(src.as_bytes()).unwrap_err();
    assert!(matches!(err, DataLoadError::Malformed { .. }));
}

#[test]
fn integral_floats_and_padding_are_accepted() {
    let src = "Country/Region, Confirmed ,Deaths,Recovered,WHO Region\n US ,100.0,10,80 ,Americas\n";
    let data = Dataset::from_reader(src.as_bytes()).unwrap();
    let r = &data.records()[0];
    assert_eq!(r.country, "US");
    assert_eq!(r.confirmed, 100);
    assert_eq!(r.recovered, 80);
}

#[test]
fn load_from_temp_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "WHO Region,Recovered,Deaths,Confirmed,Country/Region").unwrap();
    writeln!(f, "Europe,40,5,50,France").unwrap();
    let data = Dataset::load(f.path()).unwrap();
    assert_eq!(data.records()[0].confirmed, 50);
    assert_eq!(data.records()[0].country, "France");
}

#[test]
fn counts_beyond_i64_range_are_malformed() {
    let src = "Country/Region,Confirmed,Deaths,Recovered,WHO Region\n\
               A,10000000000000000000,0,0,Europe\n";
    let err = Dataset::from_reader(src.as_bytes()).unwrap_err();
    match err {
        DataLoadError::Malformed { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }

    let src = "Country/Region,Confirmed,Deaths,Recovered,WHO Region\nA,1e19,0,0,Europe\n";
    assert!(matches!(
        Dataset::from_reader(src.as_bytes()),
        Err(DataLoadError::Malformed { .. })
    ));
}

#[test]
fn largest_accepted_counts_aggregate_exactly() {
    let src = "Country/Region,Confirmed,Deaths,Recovered,WHO Region\n\
               A,9223372036854775807,0,0,Europe\n\
               B,9223372036854775807,0,0,Europe\n";
    let data = Dataset::from_reader(src.as_bytes()).unwrap();
    assert_eq!(data.records()[0].confirmed, covid_stats::models::MAX_COUNT);

    let m = covid_stats::stats::aggregate(&data);
    assert_eq!(m.total_confirmed, 2 * u128::from(covid_stats::models::MAX_COUNT));
    assert_eq!(m.total_unknown, 2 * i128::from(i64::MAX));
    assert!(!m.has_negative_residual());
    assert!((m.pct_unknown().unwrap() - 100.0).abs() < 1e-9);
}
