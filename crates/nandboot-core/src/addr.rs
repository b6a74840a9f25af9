//! Flat-offset to page/column address translation
//!
//! The controller addresses flash as (page, column). On top of that sit two
//! mutually exclusive ECC layouts:
//!
//! - **Syndrome** regions interleave the ECC bytes into the data stream, so
//!   every completed 1 KiB sub-page within the column pushes the following
//!   data right by one spare-area stride. The column itself moves.
//! - **Normal** regions keep ECC in a trailing spare area. The column is
//!   untouched and only the spare-area register advances by the stride per
//!   completed sub-page.

use crate::config::NandConfig;
use crate::geometry::GeometryProfile;

/// ECC layout classification of a flat offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// ECC bytes interleaved into the data stream
    Syndrome,
    /// ECC bytes in a separate trailing spare area
    Normal,
}

/// A controller-level flash address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAddress {
    /// Page index
    pub page: u32,
    /// Intra-page byte offset, syndrome-adjusted where applicable
    pub column: u16,
}

/// Split a flat offset into page and column, applying the syndrome column
/// shift when the region interleaves ECC bytes.
pub fn translate(
    offset: u32,
    cfg: &NandConfig,
    region: Region,
    profile: &GeometryProfile,
) -> PageAddress {
    let page = offset / cfg.block_size;
    let mut column = offset % cfg.block_size;

    if region == Region::Syndrome {
        // shift every completed sub-page to skip the inline ECC bytes
        column += (column / cfg.page_size) * profile.ecc_stride as u32;
    }

    // the column is a 16-bit register field; a validated layout keeps it
    // in range
    PageAddress {
        page,
        column: column as u16,
    }
}

/// Value for the controller's spare-area register.
///
/// Syndrome regions point it at the sub-page size; normal regions point it
/// past the data area, advanced by one stride per completed sub-page.
pub fn spare_area_offset(
    offset: u32,
    cfg: &NandConfig,
    region: Region,
    profile: &GeometryProfile,
) -> u32 {
    match region {
        Region::Syndrome => cfg.page_size,
        Region::Normal => {
            let column = offset % cfg.block_size;
            cfg.block_size + (column / cfg.page_size) * profile.ecc_stride as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::resolve;

    fn cfg() -> NandConfig {
        NandConfig::default()
    }

    fn profile() -> GeometryProfile {
        resolve(40).unwrap()
    }

    #[test]
    fn page_and_column_split_is_exact() {
        let cfg = cfg();
        let profile = profile();
        for offset in [0u32, 1, 0x3FF, 0x400, 0x1FFF, 0x2000, 0x2001, 0x73_A512] {
            let addr = translate(offset, &cfg, Region::Normal, &profile);
            assert_eq!(addr.page, offset / cfg.block_size);
            assert_eq!(addr.column as u32, offset % cfg.block_size);
            assert!((addr.column as u32) < cfg.block_size);
        }
    }

    #[test]
    fn syndrome_column_shifts_by_stride_per_subpage() {
        let cfg = cfg();
        let profile = profile();
        for offset in [0u32, 0x400, 0x800, 0x1C00, 0x2000 + 0xC00] {
            let normal = translate(offset, &cfg, Region::Normal, &profile);
            let syndrome = translate(offset, &cfg, Region::Syndrome, &profile);
            let chunks = (offset % cfg.block_size) / cfg.page_size;
            assert_eq!(
                syndrome.column,
                normal.column + (chunks as u16) * profile.ecc_stride
            );
            assert_eq!(syndrome.page, normal.page);
        }
    }

    #[test]
    fn first_subpage_needs_no_syndrome_shift() {
        let cfg = cfg();
        let profile = profile();
        let addr = translate(0x2000 + 0x3FF, &cfg, Region::Syndrome, &profile);
        assert_eq!(addr.page, 1);
        assert_eq!(addr.column, 0x3FF);
    }

    #[test]
    fn full_sixteen_bit_block_size_translates_without_panic() {
        let cfg = NandConfig {
            block_size: 0x1_0000,
            page_size: 0x1_0000,
            ..NandConfig::default()
        };
        assert!(cfg.validate().is_ok());
        let profile = profile();
        let addr = translate(0x1_FFFF, &cfg, Region::Syndrome, &profile);
        assert_eq!(addr.page, 1);
        assert_eq!(addr.column, 0xFFFF);
    }

    #[test]
    fn spare_area_for_syndrome_is_the_subpage_size() {
        let cfg = cfg();
        let profile = profile();
        assert_eq!(
            spare_area_offset(0x1C00, &cfg, Region::Syndrome, &profile),
            cfg.page_size
        );
    }

    #[test]
    fn spare_area_for_normal_advances_by_stride() {
        let cfg = cfg();
        let profile = profile();
        // first sub-page: spare sits right past the data area
        assert_eq!(
            spare_area_offset(0x40_0000, &cfg, Region::Normal, &profile),
            cfg.block_size
        );
        // third sub-page of a page: two completed chunks
        assert_eq!(
            spare_area_offset(0x40_0800, &cfg, Region::Normal, &profile),
            cfg.block_size + 2 * profile.ecc_stride as u32
        );
        // column itself stays raw in the normal region
        let addr = translate(0x40_0800, &cfg, Region::Normal, &profile);
        assert_eq!(addr.column, 0x800);
    }
}
