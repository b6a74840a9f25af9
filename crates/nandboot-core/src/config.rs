//! Build-time NAND layout parameters
//!
//! The boot reader is configured for one chip layout at a time. The
//! defaults match the Allwinner A20 boot0 arrangement: 8 KiB physical
//! pages addressed in 1 KiB sub-page transfers, 40-bit BCH, and the first
//! 4 MiB of flash using syndrome (inline-ECC) addressing.

use crate::addr::Region;
use crate::error::Error;
use crate::Result;

/// NAND layout and ECC configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NandConfig {
    /// Configured BCH strength, resolved via [`crate::geometry::resolve`]
    pub ecc_strength: u32,
    /// Bytes moved per transaction (one controller sub-page)
    pub page_size: u32,
    /// Physical NAND page size, the divisor for page/column split
    pub block_size: u32,
    /// Flat offsets below this boundary use syndrome addressing
    pub syndrome_boundary: u32,
}

impl NandConfig {
    /// Check the layout for internal consistency.
    ///
    /// The address math divides by both sizes and the column is a 16-bit
    /// register field, so a layout that violates these bounds must be
    /// rejected before a controller is built around it.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidLayout("page size must be nonzero"));
        }
        if self.block_size == 0 {
            return Err(Error::InvalidLayout("block size must be nonzero"));
        }
        if self.block_size > 0x1_0000 {
            return Err(Error::InvalidLayout(
                "block size exceeds the 16-bit column range",
            ));
        }
        if self.page_size > self.block_size {
            return Err(Error::InvalidLayout("page size exceeds block size"));
        }
        Ok(())
    }

    /// Classify a flat offset as syndrome- or normal-addressed
    pub fn region_of(&self, offset: u32) -> Region {
        if offset < self.syndrome_boundary {
            Region::Syndrome
        } else {
            Region::Normal
        }
    }
}

impl Default for NandConfig {
    fn default() -> Self {
        Self {
            ecc_strength: 40,
            page_size: 0x400,
            block_size: 0x2000,
            syndrome_boundary: 0x40_0000,
        }
    }
}
