//! Bounded-concurrency fan-out of review tasks.
//!
//! ```text
//! &[TaskSpec]
//!   ↓
//! registry::build_runner()   (all specs, before anything runs)
//!   ↓
//! Vec<TaskRunner>
//!   ↓
//! scheduler::execute_bounded() → spawned tasks behind a Semaphore
//!   ↓
//! DispatchReport { outcomes, failures }   (completion order)
//! ```

mod dispatcher;
mod scheduler;

pub use dispatcher::{
    default_concurrency_ceiling, DispatchOptions, Dispatcher, DEFAULT_MAX_OUTPUT_TOKENS,
};
pub use scheduler::execute_bounded;
