use serde::Serialize;

use crate::RunPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub phase: RunPhase,
    pub tokens: usize,
    pub chunks_planned: usize,
    pub chunks_dispatched: usize,
    pub chunks_merged: usize,
    pub chunks_failed: usize,
}
