use crate::models::CaseRecord;
use crate::stats::Metrics;
use crate::views::TABLE_COLUMNS;
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Leading characters a spreadsheet would evaluate as a formula.
const FORMULA_STARTERS: [char; 4] = ['=', '+', '-', '@'];

fn neutralize(cell: &str) -> Cow<'_, str> {
    if cell.starts_with(FORMULA_STARTERS) {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Save rows as CSV using the source column names.
pub fn save_csv<'a, I, P>(rows: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a CaseRecord>,
    P: AsRef<Path>,
{
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(TABLE_COLUMNS)?;
    for r in rows {
        wtr.serialize((
            neutralize(&r.country),
            r.confirmed,
            r.deaths,
            r.recovered,
            neutralize(&r.who_region),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_json<'a, I, P>(rows: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a CaseRecord>,
    P: AsRef<Path>,
{
    let rows: Vec<&CaseRecord> = rows.into_iter().collect();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a metrics record as pretty JSON; undefined shares become `null`.
pub fn save_metrics_json<P: AsRef<Path>>(metrics: &Metrics, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(metrics)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
