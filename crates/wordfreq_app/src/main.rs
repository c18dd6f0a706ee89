mod cli;
mod config;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_error, engine_info};
use wordfreq_engine::{compare, load_tokens, AlphanumericTokenizer, Report};

use crate::cli::Cli;
use crate::config::FileConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    engine_logging::initialize(cli.log.into(), cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => FileConfig::default(),
    };
    let settings = config::resolve_settings(&file_config, cli);
    let top = config::resolve_top(&file_config, cli);
    // Reject a bad chunk size before reading a potentially large input.
    settings.chunk_size().context("invalid settings")?;

    let buffer = load_tokens(&cli.input, &AlphanumericTokenizer)?;
    engine_info!(
        "{} tokens, chunk size {}, parallelism {}",
        buffer.len(),
        settings.chunk_size,
        settings.parallelism
    );

    let comparison = compare(&buffer, &settings).context("word count failed")?;
    let report = Report::from_comparison(&comparison, top);
    let text = output::render(&report, &cli.input, cli.format)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write report")?;
    Ok(())
}
