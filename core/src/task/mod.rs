//! Review task classes, their instruction strategies, and the runner that
//! executes one task against a backend.

pub mod instructions;
pub mod registry;
pub mod runner;

pub use instructions::{InstructionStrategy, QualityInstructions, SecurityInstructions};
pub use registry::{build_runner, known_keys, resolve, TaskClass};
pub use runner::TaskRunner;
