//! Command implementations

pub mod read;
