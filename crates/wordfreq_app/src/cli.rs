use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "wordfreq")]
#[command(about = "Count word frequencies with a parallel map-reduce pipeline and time it against a serial scan", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Text file to count
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Tokens per map task (default 200000)
    #[arg(short = 'c', long, value_name = "TOKENS")]
    pub chunk_size: Option<usize>,

    /// Parallelism to report and size worker threads with (default: available CPUs)
    #[arg(short = 'p', long, value_name = "N")]
    pub parallelism: Option<usize>,

    /// RON file with chunk_size, parallelism and top
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of most frequent words to print (default 10)
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_input_is_required() {
        let cli = Cli::try_parse_from(["wordfreq", "book.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("book.txt"));
        assert_eq!(cli.chunk_size, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log, LogTarget::Terminal);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "wordfreq", "-c", "500", "-p", "3", "-n", "5", "--format", "json", "-vv", "in.txt",
        ])
        .unwrap();
        assert_eq!(cli.chunk_size, Some(500));
        assert_eq!(cli.parallelism, Some(3));
        assert_eq!(cli.top, Some(5));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn negative_chunk_size_is_a_usage_error() {
        assert!(Cli::try_parse_from(["wordfreq", "--chunk-size", "-5", "in.txt"]).is_err());
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        assert!(Cli::try_parse_from(["wordfreq"]).is_err());
    }
}
