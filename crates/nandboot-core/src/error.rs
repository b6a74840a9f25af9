//! Error types for the NAND boot reader
//!
//! No_std compatible, Copy for efficiency. ECC mismatches are deliberately
//! not represented here: the controller only counts them, it never fails a
//! page over them.

use core::fmt;

/// Core error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configured ECC strength is not in the controller's geometry table
    UnsupportedEccStrength(u32),
    /// ECC strength resolves to a zero spare-area stride and cannot be
    /// used for reads (strengths 60 and 64 in the stock table)
    UnsupportedGeometry {
        /// The configured ECC strength
        strength: u32,
    },
    /// Command-interrupt bit never latched after command issue
    CommandTimeout,
    /// DMA-start acknowledgement never appeared in the status register
    DmaStartTimeout,
    /// DMA "loading" bit never cleared; transfer did not finish
    DmaCompletionTimeout,
    /// Controller reset bit did not read back during bring-up
    InitTimeout,
    /// Layout configuration is internally inconsistent
    InvalidLayout(&'static str),
    /// Backend cannot be constructed on this platform or configuration
    NotSupported(&'static str),
    /// Failed to map a memory-mapped register window
    MemoryMap {
        /// Physical base address of the window
        address: u32,
        /// Size of the window in bytes
        size: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEccStrength(strength) => {
                write!(f, "unsupported ECC strength ({})", strength)
            }
            Self::UnsupportedGeometry { strength } => {
                write!(
                    f,
                    "ECC strength {} has no usable spare-area stride",
                    strength
                )
            }
            Self::CommandTimeout => write!(f, "timeout waiting for command interrupt"),
            Self::DmaStartTimeout => write!(f, "timeout waiting for dma interrupt"),
            Self::DmaCompletionTimeout => {
                write!(f, "timeout waiting for dma transfer to finish")
            }
            Self::InitTimeout => write!(f, "controller reset did not complete"),
            Self::InvalidLayout(msg) => write!(f, "invalid NAND layout: {}", msg),
            Self::NotSupported(msg) => write!(f, "not supported: {}", msg),
            Self::MemoryMap { address, size } => {
                write!(f, "failed to map registers at {:#010x} (size {})", address, size)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
