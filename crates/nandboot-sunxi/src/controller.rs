//! A20 NAND controller driver
//!
//! One page transaction is a fixed register choreography: issue the
//! reset/status-clear command, program the ECC engine and spare-area
//! pointer for the addressed region, arm the dedicated DMA channel with the
//! controller FIFO as source, issue the composite read command, then wait
//! for the DMA handshake to start and drain. The image assembler repeats
//! that per sub-page to fill an arbitrary-length destination.

use nandboot_core::addr::{spare_area_offset, translate, Region};
use nandboot_core::geometry::resolve;
use nandboot_core::poll::{wait_clear, wait_set, MAX_RETRIES};
use nandboot_core::{Error, NandBus, NandConfig, Result};

use crate::clocks::set_clocks;
use crate::regs::*;
use crate::seeds::{normal_seed, RANDOM_SEED_SYNDROME};

/// Driver for the A20 NAND flash controller
///
/// Owns the bus exclusively; the hardware has exactly one outstanding
/// transaction slot, so all page reads are serialized through `&mut self`.
pub struct NandController<B: NandBus> {
    bus: B,
    cfg: NandConfig,
    initialized: bool,
}

impl<B: NandBus> NandController<B> {
    /// Create a driver over `bus` with the given layout configuration.
    ///
    /// The controller core is not touched until the first read or an
    /// explicit [`ensure_initialized`](Self::ensure_initialized).
    pub fn new(bus: B, cfg: NandConfig) -> Self {
        Self {
            bus,
            cfg,
            initialized: false,
        }
    }

    /// The layout configuration this controller was created with
    pub fn config(&self) -> &NandConfig {
        &self.cfg
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Bring the controller core out of reset.
    ///
    /// Idempotent: a second call is a logged no-op with no register
    /// traffic. The initialized mark is set before the reset poll and kept
    /// even when the reset bit never reads back; the failure is only
    /// logged, matching the boot-time behavior this driver reproduces.
    pub fn ensure_initialized(&mut self) {
        if self.initialized {
            log::warn!("NAND controller already initialized");
            return;
        }
        self.initialized = true;

        set_clocks(&mut self.bus);

        let val = self.bus.read32(NANDFLASHC_BASE + NANDFLASHC_CTL);
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_CTL,
            val | NFC_CTL_EN | NFC_CTL_RESET,
        );

        if !wait_set(
            &mut self.bus,
            NANDFLASHC_BASE + NANDFLASHC_CTL,
            NFC_CTL_RESET,
            MAX_RETRIES,
        ) {
            log::error!("couldn't initialize NAND controller: {}", Error::InitTimeout);
        }
    }

    /// Read one sub-page at `offset` into the scratch buffer.
    ///
    /// Returns whether the controller flagged an ECC mismatch for this
    /// page. A mismatch is not a failure; the data is still transferred.
    /// Any timeout aborts the transaction and leaves the scratch buffer
    /// zero-filled.
    pub fn read_page(&mut self, offset: u32, region: Region) -> Result<bool> {
        // Geometry rejection happens before any register write, including
        // the defensive bring-up below. The stock table resolves strengths
        // 60 and 64 to a zero stride, which is unusable for reads.
        let profile = resolve(self.cfg.ecc_strength)?;
        if !profile.is_readable() {
            return Err(Error::UnsupportedGeometry {
                strength: profile.strength,
            });
        }

        if !self.initialized {
            self.ensure_initialized();
        }

        let page_size = self.cfg.page_size;
        self.bus.scratch_mut()[..page_size as usize].fill(0);

        // reset/status-clear command
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_CMD,
            NFC_SEND_CMD1 | NFC_WAIT_FLAG | NFC_CMD_RESET,
        );
        if !wait_set(
            &mut self.bus,
            NANDFLASHC_BASE + NANDFLASHC_ST,
            NFC_ST_CMD_INT,
            MAX_RETRIES,
        ) {
            log::error!("error while initializing command interrupt");
            return Err(Error::CommandTimeout);
        }

        let addr = translate(offset, &self.cfg, region, &profile);
        let spare = spare_area_offset(offset, &self.cfg, region, &profile);

        // clear ecc status
        self.bus.write32(NANDFLASHC_BASE + NANDFLASHC_ECC_ST, 0);

        let rand_seed = match region {
            Region::Syndrome => RANDOM_SEED_SYNDROME,
            Region::Normal => normal_seed(addr.page),
        };

        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_ECC_CTL,
            ((rand_seed as u32) << NFC_ECC_RANDOM_SEED_OFFSET)
                | NFC_ECC_RANDOM_EN
                | NFC_ECC_EN
                | NFC_ECC_PIPELINE
                | ((profile.ecc_mode as u32) << NFC_ECC_MODE_OFFSET),
        );

        let val = self.bus.read32(NANDFLASHC_BASE + NANDFLASHC_CTL);
        self.bus
            .write32(NANDFLASHC_BASE + NANDFLASHC_CTL, val | NFC_CTL_RAM_METHOD);

        self.bus
            .write32(NANDFLASHC_BASE + NANDFLASHC_SPARE_AREA, spare);

        // arm the dedicated DMA channel: controller FIFO -> scratch page
        self.bus.write32(DMAC_BASE + DMAC_CFG_REG0, 0);
        self.bus.write32(
            DMAC_BASE + DMAC_SRC_START_ADDR_REG0,
            NANDFLASHC_BASE + NANDFLASHC_IO_DATA,
        );
        self.bus.write32(
            DMAC_BASE + DMAC_DEST_START_ADDR_REG0,
            self.bus.scratch_addr(),
        );
        self.bus.write32(
            DMAC_BASE + DMAC_DDMA_PARA_REG0,
            DMAC_DDMA_PARA_REG_SRC_WAIT_CYC | DMAC_DDMA_PARA_REG_SRC_BLK_SIZE,
        );
        self.bus.write32(DMAC_BASE + DMAC_DDMA_BC_REG0, page_size);
        self.bus.write32(
            DMAC_BASE + DMAC_CFG_REG0,
            DMAC_DDMA_CFG_REG_LOADING
                | DMAC_DDMA_CFG_REG_DMA_DEST_DATA_WIDTH_32
                | DMAC_DDMA_CFG_REG_DMA_SRC_DATA_WIDTH_32
                | DMAC_DDMA_CFG_REG_DMA_SRC_ADDR_MODE_IO
                | DMAC_DDMA_CFG_REG_DDMA_SRC_DRQ_TYPE_NFC,
        );

        // read command set: 0x30 confirm, 0x05/0xE0 random output
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_RCMD_SET,
            (0xE0 << NFC_RANDOM_READ_CMD1_OFFSET)
                | (0x05 << NFC_RANDOM_READ_CMD0_OFFSET)
                | (0x30 << NFC_READ_CMD_OFFSET),
        );
        self.bus.write32(NANDFLASHC_BASE + NANDFLASHC_SECTOR_NUM, 1);
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_ADDR_LOW,
            ((addr.page & 0xFFFF) << 16) | addr.column as u32,
        );
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_ADDR_HIGH,
            (addr.page >> 16) & 0xFF,
        );
        self.bus.write32(
            NANDFLASHC_BASE + NANDFLASHC_CMD,
            NFC_SEND_CMD1
                | NFC_SEND_CMD2
                | NFC_DATA_TRANS
                | NFC_PAGE_CMD
                | NFC_WAIT_FLAG
                | (4 << NFC_ADDR_NUM_OFFSET)
                | NFC_SEND_ADR
                | NFC_DATA_SWAP_METHOD
                | if region == Region::Syndrome { NFC_SEQ } else { 0 },
        );

        if !wait_set(
            &mut self.bus,
            NANDFLASHC_BASE + NANDFLASHC_ST,
            NFC_ST_DMA_INT,
            MAX_RETRIES,
        ) {
            log::error!("error while initializing dma interrupt");
            return Err(Error::DmaStartTimeout);
        }

        if !wait_clear(
            &mut self.bus,
            DMAC_BASE + DMAC_CFG_REG0,
            DMAC_DDMA_CFG_REG_LOADING,
            MAX_RETRIES,
        ) {
            log::error!("error while waiting for dma transfer to finish");
            return Err(Error::DmaCompletionTimeout);
        }

        Ok(self.bus.read32(NANDFLASHC_BASE + NANDFLASHC_ECC_ST) != 0)
    }

    /// Assemble `dest.len()` bytes starting at flat offset `offset`.
    ///
    /// The destination is zero-filled first, so a page whose transaction
    /// fails contributes deterministic zeros rather than stale data. A
    /// failed page is logged and skipped; the read carries on with the next
    /// page. Returns the accumulated ECC-error count; timeouts never
    /// inflate it.
    pub fn read_image(&mut self, offset: u32, dest: &mut [u8]) -> u32 {
        dest.fill(0);

        let page_size = self.cfg.page_size as usize;
        let mut ecc_errors = 0;
        let mut adr = offset;

        for chunk in dest.chunks_mut(page_size) {
            let region = self.cfg.region_of(adr);
            match self.read_page(adr, region) {
                Ok(ecc_flagged) => {
                    if ecc_flagged {
                        ecc_errors += 1;
                    }
                    chunk.copy_from_slice(&self.bus.scratch()[..chunk.len()]);
                }
                Err(e) => {
                    log::error!("page read at {:#010x} failed: {}", adr, e);
                }
            }
            // wraps rather than overflowing for reads that touch the top
            // of the 32-bit flash address space
            adr = adr.wrapping_add(page_size as u32);
        }

        ecc_errors
    }
}
