//! Session orchestration for building, validating and submitting an
//! experiment.

pub mod debounce;
pub mod session;

pub use debounce::{DEFAULT_DEBOUNCE, DebounceTimer, Debouncer};
pub use session::{DEFAULT_ALPHA, DEFAULT_EXPERIMENT_NAME, Session, SessionSettings};
