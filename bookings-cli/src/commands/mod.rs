//! Command implementations for the bookings CLI

pub mod serve;

pub use serve::run_serve;
