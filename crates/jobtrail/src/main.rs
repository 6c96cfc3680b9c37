use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use walkdir::WalkDir;

use jobtrail::error::{Result, TrackerError};
use jobtrail::sanitize;
use jobtrail::{
    load_config, persist_report, IngestPipeline, InboundEmail, JsonRecordFile, RecordStore,
    TrackerConfig,
};

/// Tracks job applications from a directory of `.eml` messages.
#[derive(Debug, Parser)]
#[command(name = "jobtrail")]
#[command(author, version, about)]
struct Args {
    /// Directory scanned recursively for `.eml` files.
    #[arg(short, long)]
    mail_dir: PathBuf,

    /// Record file; defaults to `<data dir>/jobtrail/applications.json`.
    #[arg(short, long)]
    records: Option<PathBuf>,

    /// JSON config file; built-in keyword tables are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match do_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A global tracing subscriber is already installed");
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to bridge log records: {}", e);
    }
}

fn do_main(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => TrackerConfig::default(),
    };

    let records_path = args.records.clone().unwrap_or_else(default_records_path);
    let mut repo = JsonRecordFile::open(&records_path)?;
    let mut store = RecordStore::load(&repo)?;
    info!(
        "Loaded {} records from {}",
        store.len(),
        records_path.display()
    );

    let files = list_messages(&args.mail_dir)?;
    info!("Found {} messages in {}", files.len(), args.mail_dir.display());

    let messages = files.iter().map(|path| {
        InboundEmail::from_file(path).inspect_err(|e| {
            warn!("Could not read {}: {}", sanitize::redact_path(path), e);
        })
    });

    let pipeline = IngestPipeline::from_config(&config);
    let report = pipeline.run(&mut store, messages);

    if report.has_changes() {
        persist_report(&report, &store, &mut repo)?;
        repo.save()?;
    }

    println!(
        "{} new, {} updated, {} skipped ({} failed); {} records in {}",
        report.created.len(),
        report.updated.len(),
        report.skipped.len(),
        report.failures().count(),
        repo.len(),
        repo.path().display()
    );
    Ok(())
}

fn default_records_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("jobtrail"))
        .unwrap_or_default()
        .join("applications.json")
}

/// All `*.eml` files below `dir`, sorted by path.
fn list_messages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| TrackerError::ScanFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let is_eml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("eml"));
        if entry.file_type().is_file() && is_eml {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
