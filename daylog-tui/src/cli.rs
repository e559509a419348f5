use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "daylog")]
#[command(about = "Terminal calendar for a daily learning log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured day-record API (default)
    Run,
    /// Run in dev mode with local in-memory data
    Dev {
        /// Make every save and completion toggle fail
        #[arg(long)]
        fail_writes: bool,
    },
    /// Print config path and create default file if missing
    ConfigPath,
    /// Print all day records as JSON
    Export {
        /// Only export records from this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Create or update day records from a JSON file
    Import {
        /// JSON array of day records, as written by `export`
        file: PathBuf,
    },
}
