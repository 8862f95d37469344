//! Simulated work performed by the demo handlers.
//!
//! # Responsibilities
//! - Pause a request for a fixed or random duration (I/O stand-in)
//! - Burn a fixed amount of CPU
//! - Pick a weighted random HTTP status
//!
//! # Design Decisions
//! - Delays never stall the runtime: `Yield` sleeps cooperatively,
//!   `Blocking` keeps the thread-blocking sleep but on the blocking pool
//! - Random sources are injectable so distributions can be tested with
//!   a seeded RNG

pub mod cpu;
pub mod delay;
pub mod status;

pub use cpu::burn_cpu;
pub use delay::{pause, random_delay};
pub use status::StatusTable;
