use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::AuditmapConfig;
use crate::core::MetricsSnapshot;
use crate::dashboard::build_report;
use crate::filter::{self, FilterCriteria};
use crate::io::{create_writer, JsonFileSource, ObservationSource, OutputFormat};

pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub chapters: Option<Vec<String>>,
    pub only_open: bool,
    pub default_window: bool,
    pub snapshot_file: Option<PathBuf>,
    pub config: PathBuf,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let config = AuditmapConfig::load(&options.config)?;
    let criteria = build_criteria(&options, &config)?;
    debug!("criteria: {criteria:?}");

    let source = JsonFileSource::new(&options.path);
    let records = source.fetch_all().context("loading observations")?;

    let previous = read_snapshot(options.snapshot_file.as_deref())?;
    let report = build_report(&records, &criteria, &previous, &config);

    if let Some(path) = &options.snapshot_file {
        write_snapshot(path, &report.metrics)?;
        info!("snapshot written to {}", path.display());
    }

    let writer: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    create_writer(options.format, writer).write_report(&report)?;
    Ok(())
}

fn build_criteria(options: &AnalyzeOptions, config: &AuditmapConfig) -> Result<FilterCriteria> {
    let mut criteria = if options.default_window {
        FilterCriteria::window(Utc::now().date_naive(), config.default_window_months)
    } else {
        match (&options.start_date, &options.end_date) {
            (Some(start), Some(end)) => {
                let start = filter::parse_date(start)?;
                let end = filter::parse_date(end)?;
                FilterCriteria::new().with_date_range(start, end)
            }
            _ => FilterCriteria::new(),
        }
    };

    if let Some(chapters) = &options.chapters {
        criteria = criteria.with_chapters(chapters.clone());
    }

    Ok(criteria.with_only_open(options.only_open))
}

fn read_snapshot(path: Option<&Path>) -> Result<MetricsSnapshot> {
    let Some(path) = path else {
        return Ok(MetricsSnapshot::default());
    };

    if !path.exists() {
        debug!("no snapshot at {}, starting from zeros", path.display());
        return Ok(MetricsSnapshot::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("decoding snapshot {}", path.display()))
}

fn write_snapshot(path: &Path, snapshot: &MetricsSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))
}
