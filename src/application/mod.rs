//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages the runtime behavior:
//! - Debouncer (owns the target, the state machine and the armed timer)
//! - Metrics (call and invocation counters)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod debouncer;
pub mod metrics;
pub mod ports;
