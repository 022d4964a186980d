use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policyview")]
#[command(about = "Browse, filter and paginate insurance policies from the policy API")]
#[command(version)]
pub struct Cli {
    /// API base URL (overrides POLICYVIEW_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive policy browser (default)
    Tui,

    /// Fetch policies once and print one page of the filtered list
    List {
        /// Search text sent to the API and matched against names and provider
        #[arg(short, long, default_value = "")]
        search: String,

        /// Provider filter (ALL, AOK, BARMER, DAK, ...)
        #[arg(long, default_value = "ALL")]
        provider: String,

        /// Insurance type filter (ALL, HOUSEHOLD, HEALTH, LIABILITY)
        #[arg(long, default_value = "ALL")]
        insurance_type: String,

        /// Status filter (ALL, ACTIVE, PENDING)
        #[arg(long, default_value = "ALL")]
        status: String,

        /// Page to print, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (defaults to POLICYVIEW_ROWS_PER_PAGE)
        #[arg(long)]
        rows_per_page: Option<usize>,

        /// Print every filtered row instead of one page
        #[arg(long)]
        all: bool,

        /// Output format (table, csv)
        #[arg(long, default_value = "table")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Csv,
}

impl Commands {
    pub fn parse_output_format(format: &str) -> Result<OutputFormat, anyhow::Error> {
        match format.to_lowercase().as_str() {
            "table" | "text" | "txt" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(anyhow::anyhow!(
                "Unsupported output format: {}. Supported formats: table, csv",
                other
            )),
        }
    }
}
