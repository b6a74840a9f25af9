//! nandboot-core - Core library for boot-style NAND page reads
//!
//! This crate contains the hardware-independent half of the NAND boot
//! reader: the bus abstraction used to talk to a memory-mapped flash
//! controller, the bounded register poller, the ECC geometry table and the
//! flat-offset to page/column address math.
//!
//! The actual controller protocol (command issue, ECC programming, DMA
//! handshake) lives in the driver crates built on top of this one.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod addr;
pub mod bus;
pub mod config;
pub mod error;
pub mod geometry;
pub mod poll;

pub use addr::{translate, PageAddress, Region};
pub use bus::NandBus;
pub use config::NandConfig;
pub use error::Error;
pub use geometry::{resolve, GeometryProfile};
pub use poll::{await_condition, wait_clear, wait_set, MAX_RETRIES};

/// Result type for NAND read operations
pub type Result<T> = core::result::Result<T, Error>;
