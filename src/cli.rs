use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables on stdout
    Terminal,
    /// Full report as pretty-printed JSON
    Json,
    /// Report as a markdown document
    Markdown,
}

impl From<OutputFormat> for io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => io::OutputFormat::Terminal,
            OutputFormat::Json => io::OutputFormat::Json,
            OutputFormat::Markdown => io::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "auditmap")]
#[command(about = "Audit observation analytics and compliance dashboards", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and aggregate observations into a dashboard report
    Analyze {
        /// Path to the observations JSON file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start of the inclusive date range (YYYY-MM-DD)
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,

        /// End of the inclusive date range (YYYY-MM-DD)
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,

        /// Restrict to these chapters (all chapters when omitted)
        #[arg(long, value_delimiter = ',')]
        chapters: Option<Vec<String>>,

        /// Keep only open observations
        #[arg(long)]
        only_open: bool,

        /// Use the default reporting window: six months back from today
        #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
        default_window: bool,

        /// Metrics snapshot state file; read as the previous snapshot
        /// and rewritten with the new one after the run
        #[arg(long)]
        snapshot_file: Option<PathBuf>,

        /// Configuration file
        #[arg(long, default_value = "auditmap.toml")]
        config: PathBuf,
    },

    /// List the distinct chapters present in an observations file
    Chapters {
        /// Path to the observations JSON file
        path: PathBuf,
    },

    /// Strictly decode an observations file and report what it holds
    Validate {
        /// Path to the observations JSON file
        path: PathBuf,
    },
}
