use anyhow::{Context, Result};
use std::path::Path;

use crate::io::{JsonFileSource, ObservationSource};

pub fn run(path: &Path) -> Result<()> {
    let source = JsonFileSource::new(path);
    let chapters = source.chapters().context("loading observations")?;

    for chapter in chapters {
        println!("{chapter}");
    }

    Ok(())
}
