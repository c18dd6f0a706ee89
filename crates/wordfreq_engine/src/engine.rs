use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio::runtime::{self, Runtime};
use wordfreq_core::{count_range, ChunkDescriptor, ChunkSplitter, RunState, RunSummary, Tally};

use crate::barrier::{AbandonOnPanic, BarrierSnapshot, Settlement, WorkBarrier};
use crate::{EngineError, PipelineSettings, TaskReport, TokenBuffer};

/// Counts the tokens of one chunk.
pub(crate) type Mapper = fn(&[String], ChunkDescriptor) -> Tally;

enum DispatchCommand {
    Chunk(ChunkDescriptor),
    Stop,
}

/// What the reduce loop owns when it exits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineOutput {
    pub tally: Tally,
    pub failed: Vec<ChunkDescriptor>,
    pub barrier: BarrierSnapshot,
}

/// A running fan-out/fan-in pipeline over one token buffer.
///
/// Chunks go in through [`dispatch`](Self::dispatch); the final tally only
/// comes out of [`finish`](Self::finish), after every dispatched chunk has
/// been merged. The runtime running the map tasks lives as long as the
/// handle, so no queued task is cancelled before it reports.
pub struct PipelineHandle {
    runtime: Runtime,
    cmd_tx: mpsc::Sender<DispatchCommand>,
    barrier: Arc<WorkBarrier>,
    dispatcher: JoinHandle<()>,
    reducer: JoinHandle<(Tally, Vec<ChunkDescriptor>)>,
}

impl PipelineHandle {
    pub fn start(buffer: TokenBuffer, settings: &PipelineSettings) -> Result<Self, EngineError> {
        Self::start_with(buffer, settings, count_range::<String>)
    }

    pub(crate) fn start_with(
        buffer: TokenBuffer,
        settings: &PipelineSettings,
        mapper: Mapper,
    ) -> Result<Self, EngineError> {
        // Map tasks only ever run on the blocking pool; no async worker is needed.
        let runtime = runtime::Builder::new_current_thread()
            .thread_name("wordfreq-map")
            .build()
            .map_err(EngineError::Runtime)?;
        engine_debug!(
            "starting pipeline over {} tokens (parallelism {})",
            buffer.len(),
            settings.parallelism
        );

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (report_tx, report_rx) = mpsc::channel();
        let barrier = Arc::new(WorkBarrier::new());

        let reducer = {
            let barrier = barrier.clone();
            thread::Builder::new()
                .name("wordfreq-reduce".into())
                .spawn(move || reduce_loop(report_rx, &barrier))
                .map_err(EngineError::Runtime)?
        };

        let dispatcher = {
            let barrier = barrier.clone();
            let spawner = runtime.handle().clone();
            thread::Builder::new()
                .name("wordfreq-dispatch".into())
                .spawn(move || {
                    let _guard = AbandonOnPanic(&barrier);
                    dispatch_loop(&spawner, cmd_rx, report_tx, &buffer, &barrier, mapper);
                })
                .map_err(EngineError::Runtime)?
        };

        Ok(Self {
            runtime,
            cmd_tx,
            barrier,
            dispatcher,
            reducer,
        })
    }

    /// Queues one chunk for counting. Never blocks.
    pub fn dispatch(&self, chunk: ChunkDescriptor) -> Result<(), EngineError> {
        self.cmd_tx
            .send(DispatchCommand::Chunk(chunk))
            .map_err(|_| EngineError::DispatchClosed)
    }

    pub fn barrier(&self) -> BarrierSnapshot {
        self.barrier.snapshot()
    }

    /// Stops dispatch, waits for every outstanding chunk to merge and hands
    /// back the final tally.
    pub fn finish(self) -> Result<PipelineOutput, EngineError> {
        // A dead dispatcher surfaces through its join handle below.
        let _ = self.cmd_tx.send(DispatchCommand::Stop);
        drop(self.cmd_tx);

        let barrier = self.barrier.wait();
        let dispatched = self
            .dispatcher
            .join()
            .map_err(|_| EngineError::DispatcherPanicked);
        let reduced = self
            .reducer
            .join()
            .map_err(|_| EngineError::ReducerPanicked);
        // Every map task has reported or been settled as failed by now.
        drop(self.runtime);

        dispatched?;
        let (tally, failed) = reduced?;
        Ok(PipelineOutput {
            tally,
            failed,
            barrier,
        })
    }
}

fn dispatch_loop(
    spawner: &runtime::Handle,
    cmd_rx: mpsc::Receiver<DispatchCommand>,
    report_tx: mpsc::Sender<TaskReport>,
    buffer: &TokenBuffer,
    barrier: &WorkBarrier,
    mapper: Mapper,
) {
    while let Ok(command) = cmd_rx.recv() {
        match command {
            DispatchCommand::Chunk(chunk) => {
                barrier.register();
                engine_debug!("launching map task for chunk {}", chunk);
                let buffer = buffer.clone();
                let reporter = Reporter::new(chunk, report_tx.clone());
                spawner.spawn_blocking(move || reporter.send(map_task(&buffer, chunk, mapper)));
            }
            DispatchCommand::Stop => break,
        }
    }
    barrier.seal();
    engine_debug!("dispatch sealed after {} chunks", barrier.snapshot().launched);
    // Remaining report senders belong to in-flight map tasks.
}

/// Delivers exactly one report per map task. A task dropped before it ran
/// reports its chunk as failed.
struct Reporter {
    chunk: ChunkDescriptor,
    report_tx: Option<mpsc::Sender<TaskReport>>,
}

impl Reporter {
    fn new(chunk: ChunkDescriptor, report_tx: mpsc::Sender<TaskReport>) -> Self {
        Self {
            chunk,
            report_tx: Some(report_tx),
        }
    }

    fn send(mut self, report: TaskReport) {
        if let Some(report_tx) = self.report_tx.take() {
            deliver(&report_tx, report);
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        if let Some(report_tx) = self.report_tx.take() {
            engine_warn!("map task for chunk {} dropped before reporting", self.chunk);
            deliver(&report_tx, TaskReport::Failed { chunk: self.chunk });
        }
    }
}

fn deliver(report_tx: &mpsc::Sender<TaskReport>, report: TaskReport) {
    let chunk = report.chunk();
    if report_tx.send(report).is_err() {
        engine_warn!("reduce loop gone; report for chunk {} discarded", chunk);
    }
}

fn map_task(buffer: &TokenBuffer, chunk: ChunkDescriptor, mapper: Mapper) -> TaskReport {
    match catch_unwind(AssertUnwindSafe(|| mapper(buffer.as_slice(), chunk))) {
        Ok(tally) => TaskReport::Counted { chunk, tally },
        Err(_) => {
            engine_warn!("map task for chunk {} panicked", chunk);
            TaskReport::Failed { chunk }
        }
    }
}

/// Single writer of the final tally. Exits once every report sender is gone,
/// which happens only after dispatch is sealed and every map task has reported.
fn reduce_loop(
    report_rx: mpsc::Receiver<TaskReport>,
    barrier: &WorkBarrier,
) -> (Tally, Vec<ChunkDescriptor>) {
    let _guard = AbandonOnPanic(barrier);
    let mut tally = Tally::new();
    let mut failed = Vec::new();

    for report in report_rx {
        match report {
            TaskReport::Counted {
                chunk,
                tally: partial,
            } => {
                engine_debug!("merging {} words from chunk {}", partial.len(), chunk);
                tally.merge(partial);
                barrier.settle(Settlement::Merged);
            }
            TaskReport::Failed { chunk } => {
                failed.push(chunk);
                barrier.settle(Settlement::Failed);
            }
        }
    }

    let outstanding = barrier.snapshot().outstanding;
    if outstanding > 0 {
        engine_error!("report channel closed with {} chunks outstanding", outstanding);
        barrier.abandon();
    }

    failed.sort_unstable();
    (tally, failed)
}

/// Result of one parallel counting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelRun {
    pub tally: Tally,
    pub summary: RunSummary,
}

/// Splits `buffer`, fans the chunks out to map tasks and returns the merged tally.
pub fn count_parallel(
    buffer: &TokenBuffer,
    settings: &PipelineSettings,
) -> Result<ParallelRun, EngineError> {
    count_parallel_with(buffer, settings, count_range::<String>)
}

pub(crate) fn count_parallel_with(
    buffer: &TokenBuffer,
    settings: &PipelineSettings,
    mapper: Mapper,
) -> Result<ParallelRun, EngineError> {
    let chunk_size = settings.chunk_size()?;
    let mut state = RunState::new();

    state.begin_split(buffer.len())?;
    let splitter = ChunkSplitter::new(buffer.len(), chunk_size);
    state.begin_dispatch(splitter.len())?;
    engine_info!(
        "counting {} tokens in {} chunks of {}",
        buffer.len(),
        splitter.len(),
        chunk_size
    );

    let pipeline = PipelineHandle::start_with(buffer.clone(), settings, mapper)?;
    for chunk in splitter {
        pipeline.dispatch(chunk)?;
        state.record_dispatched()?;
    }

    let output = pipeline.finish()?;
    state.complete(output.barrier.merged, output.failed.len())?;
    if !output.failed.is_empty() {
        engine_warn!("{} chunks failed", output.failed.len());
        return Err(EngineError::FailedChunks(output.failed));
    }

    let summary = state.view();
    engine_info!(
        "merged {} chunks into {} distinct words",
        summary.chunks_merged,
        output.tally.len()
    );
    Ok(ParallelRun {
        tally: output.tally,
        summary,
    })
}
