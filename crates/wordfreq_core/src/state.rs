use serde::Serialize;

use crate::view_model::RunSummary;
use crate::CoreError;

/// Lifecycle of a single counting run. Runs only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Splitting,
    DispatchingAndReducing,
    Complete,
}

/// Driver-side bookkeeping for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    phase: RunPhase,
    tokens: usize,
    chunks_planned: usize,
    chunks_dispatched: usize,
    chunks_merged: usize,
    chunks_failed: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn begin_split(&mut self, tokens: usize) -> Result<(), CoreError> {
        self.transition(RunPhase::Idle, RunPhase::Splitting)?;
        self.tokens = tokens;
        Ok(())
    }

    pub fn begin_dispatch(&mut self, chunks_planned: usize) -> Result<(), CoreError> {
        self.transition(RunPhase::Splitting, RunPhase::DispatchingAndReducing)?;
        self.chunks_planned = chunks_planned;
        Ok(())
    }

    pub fn record_dispatched(&mut self) -> Result<(), CoreError> {
        if self.phase != RunPhase::DispatchingAndReducing {
            return Err(CoreError::IllegalTransition {
                from: self.phase,
                to: RunPhase::DispatchingAndReducing,
            });
        }
        self.chunks_dispatched += 1;
        Ok(())
    }

    /// Closes the run once every dispatched chunk was either merged or failed.
    pub fn complete(&mut self, merged: usize, failed: usize) -> Result<(), CoreError> {
        if self.phase != RunPhase::DispatchingAndReducing {
            return Err(CoreError::IllegalTransition {
                from: self.phase,
                to: RunPhase::Complete,
            });
        }
        let settled = merged + failed;
        if settled != self.chunks_dispatched {
            return Err(CoreError::Unsettled {
                dispatched: self.chunks_dispatched,
                settled,
            });
        }
        self.chunks_merged = merged;
        self.chunks_failed = failed;
        self.phase = RunPhase::Complete;
        Ok(())
    }

    pub fn view(&self) -> RunSummary {
        RunSummary {
            phase: self.phase,
            tokens: self.tokens,
            chunks_planned: self.chunks_planned,
            chunks_dispatched: self.chunks_dispatched,
            chunks_merged: self.chunks_merged,
            chunks_failed: self.chunks_failed,
        }
    }

    fn transition(&mut self, expected: RunPhase, next: RunPhase) -> Result<(), CoreError> {
        if self.phase != expected {
            return Err(CoreError::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}
