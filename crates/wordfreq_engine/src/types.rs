use std::io;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use wordfreq_core::{ChunkDescriptor, CoreError, Tally};

/// Immutable, cheaply clonable sequence of normalized tokens.
///
/// Every map task holds a clone of the same allocation; nothing can mutate it
/// once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Arc<[String]>,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for TokenBuffer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for TokenBuffer {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl From<Vec<String>> for TokenBuffer {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl<S: Into<String>> FromIterator<S> for TokenBuffer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// What a map task hands to the reduce loop: exactly one per dispatched chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    Counted { chunk: ChunkDescriptor, tally: Tally },
    Failed { chunk: ChunkDescriptor },
}

impl TaskReport {
    pub fn chunk(&self) -> ChunkDescriptor {
        match self {
            TaskReport::Counted { chunk, .. } | TaskReport::Failed { chunk } => *chunk,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("failed to start pipeline: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to read input {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dispatch loop is no longer accepting chunks")]
    DispatchClosed,
    #[error("dispatch loop panicked")]
    DispatcherPanicked,
    #[error("reduce loop panicked")]
    ReducerPanicked,
    #[error("{} chunk(s) failed to count", .0.len())]
    FailedChunks(Vec<ChunkDescriptor>),
}
