//! Wordfreq core: chunking, tallies and the per-run state machine.
mod chunk;
mod error;
mod state;
mod tally;
mod view_model;

pub use chunk::{split_chunks, ChunkDescriptor, ChunkSize, ChunkSplitter, DEFAULT_CHUNK_SIZE};
pub use error::CoreError;
pub use state::{RunPhase, RunState};
pub use tally::{count_range, Tally};
pub use view_model::RunSummary;
