//! Command implementations for the tally CLI

pub mod serve;

pub use serve::run_serve;
