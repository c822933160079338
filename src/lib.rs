//! covid_stats
//!
//! Filter and summarize a per-country pandemic case snapshot. Pairs with the
//! `covid` CLI.
//!
//! ### Features
//! - Load a CSV snapshot (`Country/Region`, `Confirmed`, `Deaths`, `Recovered`, `WHO Region`)
//! - Filter by WHO region and/or country with wildcard sentinels
//! - Totals and outcome shares, with an explicit "undefined" state instead of NaN
//! - Chart-ready series and CSV/JSON export of the filtered rows
//!
//! ### Example
//! ```no_run
//! use covid_stats::{Dataset, Selection, filter, stats};
//!
//! let data = Dataset::load("covid_data.csv")?;
//! let selection = Selection::new(["Europe"], ["All Countries"]);
//! let rows = filter::filter(&data, &selection);
//! let metrics = stats::aggregate(rows.iter().copied());
//! println!("{:#?}", metrics);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dataset;
pub mod error;
pub mod filter;
pub mod models;
pub mod report;
pub mod stats;
pub mod storage;
pub mod views;

pub use dataset::Dataset;
pub use error::DataLoadError;
pub use models::{ALL_COUNTRIES, ALL_REGIONS, CaseRecord, DimensionFilter, Selection};
pub use stats::{Metrics, Shares};
