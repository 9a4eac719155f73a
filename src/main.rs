use anyhow::{Context, Result};
use clap::Parser;
use jdlink_check::cli::{Cli, OutputFormat};
use jdlink_check::config::Config;
use jdlink_check::matcher::HeuristicMatcher;
use jdlink_check::report::{JsonReporter, Reporter, TextReporter};
use jdlink_check::resolve::run;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

const EXIT_MISSING: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let out = open_output(config.output.as_deref())?;
    let mut reporter: Box<dyn Reporter> = match config.format {
        OutputFormat::Text => Box::new(TextReporter::new(out)),
        OutputFormat::Json => Box::new(JsonReporter::new(out)),
    };

    let summary = run(&config, &HeuristicMatcher::new(), reporter.as_mut())?;

    if config.fail_on_missing && summary.missing > 0 {
        return Ok(ExitCode::from(EXIT_MISSING));
    }
    Ok(ExitCode::SUCCESS)
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = output else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
