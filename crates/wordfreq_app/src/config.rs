//! Optional RON settings file, overlaid by command-line flags.

use std::fs;
use std::path::Path;

use anyhow::Context;
use engine_logging::engine_info;
use serde::Deserialize;
use wordfreq_engine::PipelineSettings;

use crate::cli::Cli;

pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub chunk_size: Option<usize>,
    pub parallelism: Option<usize>,
    pub top: Option<usize>,
}

pub fn load_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: FileConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    engine_info!("Loaded settings from {:?}", path);
    Ok(config)
}

/// Flags win over the file, the file wins over built-in defaults.
pub fn resolve_settings(file: &FileConfig, cli: &Cli) -> PipelineSettings {
    let defaults = PipelineSettings::default();
    PipelineSettings {
        chunk_size: cli
            .chunk_size
            .or(file.chunk_size)
            .unwrap_or(defaults.chunk_size),
        parallelism: cli
            .parallelism
            .or(file.parallelism)
            .unwrap_or(defaults.parallelism),
    }
}

pub fn resolve_top(file: &FileConfig, cli: &Cli) -> usize {
    cli.top.or(file.top).unwrap_or(DEFAULT_TOP)
}
