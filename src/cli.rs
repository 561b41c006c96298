//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::snapshot_adapter::SnapshotFileAdapter;
use crate::adapters::text_format::TextFileAdapter;
use crate::domain::error::RealfinError;
use crate::domain::financing::{
    Apartment, Financing, House, Land, LoanTerms, Property, ZoneType,
};
use crate::domain::locale::{format_currency, format_decimal};
use crate::domain::settings::{build_settings, Settings};
use crate::domain::summary::Summary;
use crate::domain::valuation::Payment;
use crate::ports::record_port::RecordPort;
use crate::ports::report_port::ReportPort;
use crate::ports::snapshot_port::SnapshotPort;

#[derive(Parser, Debug)]
#[command(name = "realfin", about = "Real-estate financing calculator")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a financing and append it to the text file
    Add {
        #[command(subcommand)]
        property: PropertyArgs,
    },
    /// List the records stored in the text file
    List,
    /// Whole-collection snapshot operations
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
    /// Print aggregate totals
    Summary {
        #[arg(long, value_enum, default_value_t = Source::Text)]
        source: Source,
    },
    /// Export records and totals as CSV
    Export {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Source::Text)]
        source: Source,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TermsArgs {
    /// Property value
    #[arg(long)]
    pub value: f64,
    /// Loan term in years
    #[arg(long)]
    pub years: u32,
    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: f64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PropertyArgs {
    House {
        #[command(flatten)]
        terms: TermsArgs,
        #[arg(long)]
        built_area: f64,
        #[arg(long)]
        land_area: f64,
        /// Overrides the configured fixed monthly increase
        #[arg(long)]
        fixed_increase: Option<f64>,
    },
    Apartment {
        #[command(flatten)]
        terms: TermsArgs,
        #[arg(long, default_value_t = 0)]
        garage_spaces: u32,
        #[arg(long, allow_hyphen_values = true)]
        floor: i32,
    },
    Land {
        #[command(flatten)]
        terms: TermsArgs,
        #[arg(long, value_enum)]
        zone: ZoneArg,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SnapshotAction {
    /// Overwrite the snapshot with every record in the text file
    Save {
        /// Write the snapshot even when the text file holds no records
        #[arg(long)]
        allow_empty: bool,
    },
    /// List the records stored in the snapshot
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneArg {
    Residential,
    Commercial,
}

impl From<ZoneArg> for ZoneType {
    fn from(zone: ZoneArg) -> Self {
        match zone {
            ZoneArg::Residential => ZoneType::Residential,
            ZoneArg::Commercial => ZoneType::Commercial,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Text,
    Snapshot,
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match resolve_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    init_tracing(&settings.log_filter, cli.verbose);

    let text = TextFileAdapter::new(&settings.text_path);
    let snapshot = SnapshotFileAdapter::new(&settings.snapshot_path);

    let result = match cli.command {
        Command::Add { property } => build_record(&property, &settings)
            .and_then(|record| run_add(&text, record))
            .map(|_| ()),
        Command::List => run_list(&text),
        Command::Snapshot { action } => match action {
            SnapshotAction::Save { allow_empty } => {
                run_snapshot_save(&text, &snapshot, allow_empty).map(|_| ())
            }
            SnapshotAction::Show => run_snapshot_show(&snapshot),
        },
        Command::Summary { source } => run_summary(source, &text, &snapshot).map(|_| ()),
        Command::Export { output, source } => {
            run_export(source, &text, &snapshot, &CsvReportAdapter, &output)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn resolve_settings(config_path: Option<&Path>) -> Result<Settings, RealfinError> {
    match config_path {
        None => Ok(Settings::default()),
        Some(path) => {
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| RealfinError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            build_settings(&adapter)
        }
    }
}

/// `RUST_LOG` wins, then `--verbose`, then the configured filter.
fn init_tracing(configured: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("realfin=debug")
        } else {
            EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("realfin=info"))
        }
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn build_record(args: &PropertyArgs, settings: &Settings) -> Result<Financing, RealfinError> {
    let terms = |t: &TermsArgs| LoanTerms::new(t.value, t.years, t.rate);

    let record = match args {
        PropertyArgs::House {
            terms: t,
            built_area,
            land_area,
            fixed_increase,
        } => Financing::house(
            terms(t)?,
            House::with_fixed_increase(
                *built_area,
                *land_area,
                fixed_increase.unwrap_or(settings.house_fixed_increase),
            )?,
        ),
        PropertyArgs::Apartment {
            terms: t,
            garage_spaces,
            floor,
        } => Financing::apartment(terms(t)?, Apartment::new(*garage_spaces, *floor)),
        PropertyArgs::Land { terms: t, zone } => {
            Financing::land(terms(t)?, Land::new((*zone).into()))
        }
    };
    Ok(record)
}

/// Settles the record, prints its payments and appends it.
pub fn run_add(port: &dyn RecordPort, mut record: Financing) -> Result<Payment, RealfinError> {
    let payment = record.settle();
    if let Some(adjusted) = payment.adjusted_increase {
        eprintln!(
            "notice: fixed increase reduced to {} to match the monthly interest portion",
            format_currency(adjusted)
        );
    }

    port.append(&record)?;
    println!("{}", describe("new", &record));
    eprintln!("Record saved.");
    Ok(payment)
}

pub fn run_list(port: &dyn RecordPort) -> Result<(), RealfinError> {
    let records = port.load_all()?;
    print_records(&records);
    Ok(())
}

/// Returns the number of records written.
pub fn run_snapshot_save(
    text: &dyn RecordPort,
    snapshot: &dyn SnapshotPort,
    allow_empty: bool,
) -> Result<usize, RealfinError> {
    let records = text.load_all()?;
    if records.is_empty() && !allow_empty {
        eprintln!("No saved records; snapshot left untouched (use --allow-empty to overwrite).");
        return Ok(0);
    }
    snapshot.save(&records)?;
    eprintln!("Snapshot written: {} records", records.len());
    Ok(records.len())
}

pub fn run_snapshot_show(snapshot: &dyn SnapshotPort) -> Result<(), RealfinError> {
    let records = snapshot.load()?;
    print_records(&records);
    Ok(())
}

pub fn load_records(
    source: Source,
    text: &dyn RecordPort,
    snapshot: &dyn SnapshotPort,
) -> Result<Vec<Financing>, RealfinError> {
    match source {
        Source::Text => text.load_all(),
        Source::Snapshot => snapshot.load(),
    }
}

pub fn run_summary(
    source: Source,
    text: &dyn RecordPort,
    snapshot: &dyn SnapshotPort,
) -> Result<Summary, RealfinError> {
    let records = load_records(source, text, snapshot)?;
    let summary = Summary::compute(&records);
    print!("{}", summary.render());
    Ok(summary)
}

pub fn run_export(
    source: Source,
    text: &dyn RecordPort,
    snapshot: &dyn SnapshotPort,
    report: &dyn ReportPort,
    output: &Path,
) -> Result<(), RealfinError> {
    let records = load_records(source, text, snapshot)?;
    let summary = Summary::compute(&records);
    report.write(&records, &summary, output)?;
    eprintln!("Report written to: {}", output.display());
    Ok(())
}

fn print_records(records: &[Financing]) {
    if records.is_empty() {
        eprintln!("No saved records.");
        return;
    }
    for (idx, record) in records.iter().enumerate() {
        println!("{}", describe(idx + 1, record));
    }
}

/// One-paragraph human description of a record and its payments.
pub fn describe(label: impl std::fmt::Display, record: &Financing) -> String {
    let terms = record.terms();
    let payment = record.payment();

    let details = match record.property() {
        Property::House(house) => format!(
            "built {} m², land {} m², fixed increase {}",
            format_decimal(house.built_area(), 2),
            format_decimal(house.land_area(), 2),
            format_currency(house.fixed_increase())
        ),
        Property::Apartment(apartment) => format!(
            "{} garage spaces, floor {}",
            apartment.garage_spaces, apartment.floor_number
        ),
        Property::Land(land) => format!("{} zone", land.zone.name()),
    };

    format!(
        "[{}] {}: value {}, {} years at {}% ({})\n    monthly {}, total {}",
        label,
        record.kind(),
        format_currency(terms.property_value()),
        terms.loan_term_years(),
        format_decimal(terms.annual_interest_rate(), 2),
        details,
        format_currency(payment.monthly),
        format_currency(payment.total),
    )
}
