//! Domain layer - pure debounce logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of debouncing:
//! - Validated options (wait, edges, max wait)
//! - The edge state machine deciding when the target runs
//!
//! Nothing here reads a clock or arms a timer. Callers pass the current
//! instant in and get decisions back, so every rule is testable with plain
//! `Instant` arithmetic.

pub mod options;
pub mod state;
