#![forbid(unsafe_code)]

//! Domain model for the arithmetic quiz engine.
//!
//! This crate holds the pure data types (operations, difficulty profiles,
//! questions, answer records) plus the clock abstraction used for
//! deterministic time. All behavior, from generation to session flow, lives
//! in the `services` crate.

pub mod model;
pub mod time;

pub use time::Clock;
