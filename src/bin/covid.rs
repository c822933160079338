use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use covid_stats::{ALL_COUNTRIES, ALL_REGIONS, Dataset, Selection};
use covid_stats::stats::{Metrics, RegionSummary};
use covid_stats::{dataset, filter, report, stats, storage};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "covid",
    version,
    about = "Filter & summarize a per-country COVID-19 case snapshot"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print totals and outcome shares for a selection.
    Summary(SummaryArgs),
    /// List the distinct regions or countries in the snapshot.
    List(ListArgs),
    /// Write the filtered rows to a file.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// CSV snapshot with Country/Region, Confirmed, Deaths, Recovered, WHO Region columns.
    #[arg(long, default_value = "covid_data.csv")]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// WHO regions separated by comma or semicolon (default: all regions).
    #[arg(short, long)]
    regions: Option<String>,
    /// Countries separated by comma or semicolon (default: all countries).
    #[arg(short, long)]
    countries: Option<String>,
}

impl SelectionArgs {
    fn to_selection(&self) -> Selection {
        let regions = match &self.regions {
            Some(s) => parse_list(s),
            None => vec![ALL_REGIONS.to_string()],
        };
        let countries = match &self.countries {
            Some(s) => parse_list(s),
            None => vec![ALL_COUNTRIES.to_string()],
        };
        Selection::new(regions, countries)
    }
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Also break the totals down per WHO region.
    #[arg(long, default_value_t = false)]
    by_region: bool,
    /// Print the metrics as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(ValueEnum, Clone, Debug)]
enum Dimension {
    Regions,
    Countries,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(value_enum)]
    dimension: Dimension,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Destination file.
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Serialize)]
struct RegionReport<'a> {
    metrics: &'a Metrics,
    regions: Vec<RegionSummary>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn load(source: &SourceArgs) -> Result<Dataset> {
    Dataset::load(&source.data)
        .with_context(|| format!("loading {}", source.data.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Summary(args) => cmd_summary(args),
        Command::List(args) => cmd_list(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_summary(args: SummaryArgs) -> Result<()> {
    let data = load(&args.source)?;
    let selection = args.selection.to_selection();
    let rows = filter::filter(&data, &selection);
    log::info!("{} of {} rows selected", rows.len(), data.len());
    let metrics = stats::aggregate(rows.iter().copied());

    if metrics.has_negative_residual() {
        let bad = stats::inconsistent_records(rows.iter().copied());
        log::warn!(
            "deaths + recovered exceed confirmed ({} inconsistent rows)",
            bad.len()
        );
        for r in &bad {
            eprintln!(
                "warning: {} reports {} deaths + {} recovered > {} confirmed",
                r.country, r.deaths, r.recovered, r.confirmed
            );
        }
    }

    if args.json {
        let out = if args.by_region {
            serde_json::to_string_pretty(&RegionReport {
                metrics: &metrics,
                regions: stats::grouped_by_region(rows.iter().copied()),
            })?
        } else {
            serde_json::to_string_pretty(&metrics)?
        };
        println!("{out}");
        return Ok(());
    }

    print!("{}", report::render_summary(&metrics, &args.locale));
    if args.by_region {
        println!();
        let groups = stats::grouped_by_region(rows.iter().copied());
        print!("{}", report::render_regions(&groups, &args.locale));
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let data = load(&args.source)?;
    let values = match args.dimension {
        Dimension::Regions => dataset::distinct_regions(&data),
        Dimension::Countries => dataset::distinct_countries(&data),
    };
    for v in values {
        println!("{v}");
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let data = load(&args.source)?;
    let rows = filter::filter(&data, &args.selection.to_selection());

    let path = &args.out;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(rows.iter().copied(), path)?,
        "json" => storage::save_json(rows.iter().copied(), path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}
