//! ECC geometry resolution
//!
//! The controller supports a fixed set of BCH strengths. Each strength maps
//! to the small mode code programmed into the ECC control register and to
//! the spare-area stride used by the address math: the number of
//! out-of-band bytes the controller emits per 1 KiB sub-page.
//!
//! The table is kept exactly as the hardware vendor ships it, including the
//! zero strides for strengths 60 and 64. Those entries resolve, but a
//! zero-stride profile cannot be used for reads and is rejected by the
//! transaction engine before it touches any register.

use crate::error::Error;
use crate::Result;

/// Resolved ECC geometry for the configured strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryProfile {
    /// The ECC strength this profile was resolved from
    pub strength: u32,
    /// Mode code for bits 12..16 of the ECC control register
    pub ecc_mode: u16,
    /// Spare-area stride in bytes, per 1 KiB sub-page
    pub ecc_stride: u16,
}

impl GeometryProfile {
    /// Whether this profile can actually be used for a page read
    pub fn is_readable(&self) -> bool {
        self.ecc_stride != 0
    }
}

/// Strength / mode / stride table, as shipped
const GEOMETRY_TABLE: [(u32, u16, u16); 9] = [
    (16, 0, 0x20),
    (24, 1, 0x2e),
    (28, 2, 0x32),
    (32, 3, 0x3c),
    (40, 4, 0x4a),
    (48, 4, 0x52),
    (56, 4, 0x60),
    (60, 4, 0x00),
    (64, 4, 0x00),
];

/// Resolve an ECC strength to its geometry profile.
///
/// Pure table lookup with no side effects; an unknown strength is rejected
/// here, before any hardware is involved.
pub fn resolve(strength: u32) -> Result<GeometryProfile> {
    GEOMETRY_TABLE
        .iter()
        .find(|(s, _, _)| *s == strength)
        .map(|&(strength, ecc_mode, ecc_stride)| GeometryProfile {
            strength,
            ecc_mode,
            ecc_stride,
        })
        .ok_or(Error::UnsupportedEccStrength(strength))
}
