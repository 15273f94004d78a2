use anyhow::Result;
use clap::Parser;

use auditmap::cli::{Cli, Commands};
use auditmap::commands::{analyze, chapters, validate};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            start_date,
            end_date,
            chapters,
            only_open,
            default_window,
            snapshot_file,
            config,
        } => analyze::run(analyze::AnalyzeOptions {
            path,
            format: format.into(),
            output,
            start_date,
            end_date,
            chapters,
            only_open,
            default_window,
            snapshot_file,
            config,
        }),
        Commands::Chapters { path } => chapters::run(&path),
        Commands::Validate { path } => validate::run(&path),
    }
}
