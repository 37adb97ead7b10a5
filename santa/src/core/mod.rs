//! Pure logic for building a gift exchange.
//!
//! Core modules must be free of I/O side effects. Randomness is injected by the
//! caller so every function is deterministic for a given RNG state.

pub mod address;
pub mod assign;
pub mod roster;
pub mod types;
