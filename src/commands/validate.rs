use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

use crate::core::metrics::{count_by_status, distinct_chapters};
use crate::core::MonthKey;
use crate::io::{JsonFileSource, ObservationSource};

/// Strictly decode an observations file and print what it holds. Any
/// undecodable record fails the whole run, mirroring how the analyze
/// pipeline treats the file.
pub fn run(path: &Path) -> Result<()> {
    let source = JsonFileSource::new(path);
    let records = source.fetch_all().context("validating observations")?;

    let (open, complied) = count_by_status(records.iter());
    let chapters = distinct_chapters(records.iter());
    let months: BTreeSet<MonthKey> = records
        .iter()
        .map(|obs| MonthKey::from_date(obs.date))
        .collect();

    println!("{}: ok", path.display());
    println!("  observations: {} ({} open, {} complied)", records.len(), open, complied);
    println!("  chapters: {}", chapters.len());
    if let (Some(first), Some(last)) = (months.first(), months.last()) {
        println!("  months: {} ({} through {})", months.len(), first, last);
    }

    Ok(())
}
