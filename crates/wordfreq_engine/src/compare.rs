use std::time::{Duration, Instant};

use engine_logging::{engine_info, engine_warn};
use wordfreq_core::{RunSummary, Tally};

use crate::{count_parallel, count_sequential, EngineError, PipelineSettings, TokenBuffer};

/// Timings and results of the parallel pipeline next to the sequential scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub tokens: usize,
    pub chunk_size: usize,
    pub parallelism: usize,
    pub summary: RunSummary,
    pub parallel_elapsed: Duration,
    pub sequential_elapsed: Duration,
    pub tally: Tally,
    pub tallies_agree: bool,
}

impl Comparison {
    /// Sequential time divided by parallel time; `None` when either is zero.
    pub fn speedup(&self) -> Option<f64> {
        if self.parallel_elapsed.is_zero() || self.sequential_elapsed.is_zero() {
            return None;
        }
        Some(self.sequential_elapsed.as_secs_f64() / self.parallel_elapsed.as_secs_f64())
    }
}

/// Runs the pipeline, then the sequential baseline, over the same buffer.
pub fn compare(buffer: &TokenBuffer, settings: &PipelineSettings) -> Result<Comparison, EngineError> {
    let started = Instant::now();
    let parallel = count_parallel(buffer, settings)?;
    let parallel_elapsed = started.elapsed();

    let started = Instant::now();
    let sequential = count_sequential(buffer);
    let sequential_elapsed = started.elapsed();

    let tallies_agree = parallel.tally == sequential;
    if !tallies_agree {
        engine_warn!(
            "parallel tally ({} words) differs from sequential tally ({} words)",
            parallel.tally.len(),
            sequential.len()
        );
    }
    engine_info!(
        "parallel {:?} vs sequential {:?} over {} tokens",
        parallel_elapsed,
        sequential_elapsed,
        buffer.len()
    );

    Ok(Comparison {
        tokens: buffer.len(),
        chunk_size: settings.chunk_size,
        parallelism: settings.parallelism,
        summary: parallel.summary,
        parallel_elapsed,
        sequential_elapsed,
        tally: parallel.tally,
        tallies_agree,
    })
}
