use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "jdlink-check")]
#[command(about = "Check that javadoc links still resolve against Java source jars")]
pub struct Cli {
    /// Source jars or zips; directories are searched for them.
    #[arg(value_name = "ARCHIVE")]
    pub archives: Vec<PathBuf>,

    /// Javadoc link dump (`link=page=line` per line).
    #[arg(short = 'd', long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with status 2 when any link is missing.
    #[arg(long)]
    pub fail_on_missing: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
