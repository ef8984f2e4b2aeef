pub mod error;
pub mod opcode;
pub mod tape;
pub mod loop_stack;
pub mod engine;

pub use engine::{Engine, EngineConfig, EofBehavior, run};
pub use error::EngineError;
