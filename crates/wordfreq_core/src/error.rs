use thiserror::Error;

use crate::RunPhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid chunk size {0}: must be greater than zero")]
    InvalidChunkSize(usize),
    #[error("illegal run transition from {from:?} to {to:?}")]
    IllegalTransition { from: RunPhase, to: RunPhase },
    #[error("run cannot complete: {dispatched} chunks dispatched but {settled} settled")]
    Unsettled { dispatched: usize, settled: usize },
}
