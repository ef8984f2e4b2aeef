use thiserror::Error;

/// Fatal conditions that stop the engine mid-run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("too many nested loops (limit {capacity}) at pc={pc}")]
    LoopDepthExceeded { capacity: usize, pc: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
