use std::num::NonZeroUsize;
use std::thread;

use wordfreq_core::{ChunkSize, CoreError, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Tokens per map task. Validated when a run starts.
    pub chunk_size: usize,
    /// Informational: reported alongside timings. One map task is launched
    /// per chunk regardless of this value.
    pub parallelism: usize,
}

impl PipelineSettings {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    pub fn chunk_size(&self) -> Result<ChunkSize, CoreError> {
        ChunkSize::new(self.chunk_size)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallelism: available_parallelism(),
        }
    }
}

fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_reference_chunk_size() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.chunk_size, 200_000);
        assert!(settings.parallelism >= 1);
    }

    #[test]
    fn zero_chunk_size_fails_validation() {
        let settings = PipelineSettings::with_chunk_size(0);
        assert_eq!(settings.chunk_size(), Err(CoreError::InvalidChunkSize(0)));
    }
}
