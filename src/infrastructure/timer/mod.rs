//! Timer adapters.
//!
//! - `TokioTimer`: one sleeping task per armed timer (requires the `async` feature)
//! - `ThreadTimer`: one parked thread per armed timer, no runtime needed

#[cfg(feature = "async")]
pub mod runtime;
pub mod thread;

#[cfg(feature = "async")]
pub use runtime::TokioTimer;
pub use thread::ThreadTimer;
