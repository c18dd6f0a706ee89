//! Wordfreq engine: the fan-out/fan-in counting pipeline and its I/O wrappers.
mod barrier;
mod compare;
mod engine;
mod input;
mod report;
mod sequential;
mod settings;
mod token;
mod types;

pub use barrier::{BarrierSnapshot, Settlement, WorkBarrier};
pub use compare::{compare, Comparison};
pub use engine::{count_parallel, ParallelRun, PipelineHandle, PipelineOutput};
pub use input::{load_tokens, read_tokens, tokens_from_text};
pub use report::{Report, WordCount};
pub use sequential::count_sequential;
pub use settings::PipelineSettings;
pub use token::{AlphanumericTokenizer, Tokenizer};
pub use types::{EngineError, TaskReport, TokenBuffer};
