//! nandboot-sim - In-memory NAND controller emulator
//!
//! Emulates the register-level handshake of the A20 NAND flash controller
//! and its dedicated DMA channel: the reset command latches the
//! command-interrupt bit, the composite read command latches the address
//! registers, fills the scratch page from a deterministic backing image and
//! completes the DMA handshake. Useful for testing the driver and for
//! `--programmer sim` dry runs without hardware.
//!
//! Fault injection is keyed by transfer ordinal (the how-many-eth data
//! transfer since construction), so multi-page reads can be wedged at a
//! chosen point. A write trace and delay counter are kept for assertions.

use std::collections::HashMap;

use nandboot_core::{NandBus, NandConfig};

// Register addresses and bits, mirrored from the driver's protocol. Kept
// as private constants so the emulator stays decoupled from the driver
// crate (which uses it as a dev-dependency).
const NFC_BASE: u32 = 0x01C0_3000;
const NFC_CTL: u32 = NFC_BASE;
const NFC_ST: u32 = NFC_BASE + 0x04;
const NFC_ADDR_LOW: u32 = NFC_BASE + 0x14;
const NFC_ADDR_HIGH: u32 = NFC_BASE + 0x18;
const NFC_CMD: u32 = NFC_BASE + 0x24;
const NFC_ECC_ST: u32 = NFC_BASE + 0x38;

const NFC_CTL_RESET: u32 = 1 << 1;
const NFC_ST_CMD_INT: u32 = 1 << 1;
const NFC_ST_DMA_INT: u32 = 1 << 2;
const NFC_DATA_TRANS: u32 = 1 << 21;

const DMAC_BASE: u32 = 0x01C0_2000;
const DMAC_CFG: u32 = DMAC_BASE + 0x300;
const DMAC_BC: u32 = DMAC_BASE + 0x30C;
const DMAC_LOADING: u32 = 1 << 31;

/// Deterministic byte at a flat flash offset in the simulated image
pub fn image_byte(flat: u32) -> u8 {
    (flat.wrapping_mul(0x9E37_79B1) >> 24) as u8
}

/// Simulated controller bus
pub struct SimBus {
    cfg: NandConfig,
    regs: HashMap<u32, u32>,
    status: u32,
    dma_cfg: u32,
    scratch: Vec<u8>,
    scratch_addr: u32,
    transfers: usize,
    delays: u32,
    trace: Vec<(u32, u32)>,
    // fault injection
    fail_command_interrupt: bool,
    fail_reset_readback: bool,
    wedge_dma_start_from: Option<usize>,
    wedge_dma_completion_from: Option<usize>,
    ecc_error_transfers: Vec<usize>,
}

impl SimBus {
    /// Create a healthy simulated controller for the given layout
    pub fn new(cfg: NandConfig) -> Self {
        Self {
            cfg,
            regs: HashMap::new(),
            status: 0,
            dma_cfg: 0,
            scratch: vec![0; cfg.page_size as usize],
            scratch_addr: 0x4000_0000,
            transfers: 0,
            delays: 0,
            trace: Vec::new(),
            fail_command_interrupt: false,
            fail_reset_readback: false,
            wedge_dma_start_from: None,
            wedge_dma_completion_from: None,
            ecc_error_transfers: Vec::new(),
        }
    }

    /// Never latch the command-interrupt bit
    pub fn fail_command_interrupt(mut self) -> Self {
        self.fail_command_interrupt = true;
        self
    }

    /// Reset bit reads back clear during bring-up
    pub fn fail_reset_readback(mut self) -> Self {
        self.fail_reset_readback = true;
        self
    }

    /// DMA-start acknowledgement never appears from transfer `n` onward
    pub fn wedge_dma_start_from(mut self, n: usize) -> Self {
        self.wedge_dma_start_from = Some(n);
        self
    }

    /// DMA "loading" bit never clears from transfer `n` onward
    pub fn wedge_dma_completion_from(mut self, n: usize) -> Self {
        self.wedge_dma_completion_from = Some(n);
        self
    }

    /// Flag an ECC mismatch on the given transfer ordinals
    pub fn ecc_errors_on(mut self, transfers: &[usize]) -> Self {
        self.ecc_error_transfers = transfers.to_vec();
        self
    }

    /// All register writes performed so far, in order
    pub fn writes(&self) -> &[(u32, u32)] {
        &self.trace
    }

    /// Number of polling delays the driver requested
    pub fn delays(&self) -> u32 {
        self.delays
    }

    /// Number of data transfers issued
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    fn wedged(limit: Option<usize>, ordinal: usize) -> bool {
        limit.is_some_and(|n| ordinal >= n)
    }

    fn data_transfer(&mut self) {
        let ordinal = self.transfers;
        self.transfers += 1;

        let low = self.regs.get(&NFC_ADDR_LOW).copied().unwrap_or(0);
        let high = self.regs.get(&NFC_ADDR_HIGH).copied().unwrap_or(0);
        let column = low & 0xFFFF;
        let page = (low >> 16) | (high << 16);
        let count = self.regs.get(&DMAC_BC).copied().unwrap_or(0) as usize;

        if Self::wedged(self.wedge_dma_start_from, ordinal) {
            log::debug!("sim: withholding dma start for transfer {}", ordinal);
            return;
        }
        self.status |= NFC_ST_DMA_INT;

        if Self::wedged(self.wedge_dma_completion_from, ordinal) {
            log::debug!("sim: wedging dma completion for transfer {}", ordinal);
            return;
        }

        let flat = page * self.cfg.block_size + column;
        let count = count.min(self.scratch.len());
        for (i, byte) in self.scratch[..count].iter_mut().enumerate() {
            *byte = image_byte(flat + i as u32);
        }

        self.dma_cfg &= !DMAC_LOADING;
        let ecc = u32::from(self.ecc_error_transfers.contains(&ordinal));
        self.regs.insert(NFC_ECC_ST, ecc);
    }
}

impl NandBus for SimBus {
    fn read32(&mut self, addr: u32) -> u32 {
        match addr {
            NFC_ST => self.status,
            DMAC_CFG => self.dma_cfg,
            NFC_CTL if self.fail_reset_readback => {
                self.regs.get(&NFC_CTL).copied().unwrap_or(0) & !NFC_CTL_RESET
            }
            _ => self.regs.get(&addr).copied().unwrap_or(0),
        }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        self.trace.push((addr, value));
        match addr {
            NFC_CMD if value & NFC_DATA_TRANS != 0 => {
                self.regs.insert(addr, value);
                self.data_transfer();
            }
            NFC_CMD => {
                self.regs.insert(addr, value);
                if !self.fail_command_interrupt {
                    self.status |= NFC_ST_CMD_INT;
                }
            }
            DMAC_CFG => self.dma_cfg = value,
            _ => {
                self.regs.insert(addr, value);
            }
        }
    }

    fn delay_ms(&mut self, _ms: u32) {
        self.delays += 1;
    }

    fn scratch_addr(&self) -> u32 {
        self.scratch_addr
    }

    fn scratch(&self) -> &[u8] {
        &self.scratch
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        &mut self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMD_RESET: u32 = (1 << 22) | (1 << 23) | 0xFF;

    #[test]
    fn reset_command_latches_command_interrupt() {
        let mut bus = SimBus::new(NandConfig::default());
        assert_eq!(bus.read32(NFC_ST) & NFC_ST_CMD_INT, 0);
        bus.write32(NFC_CMD, CMD_RESET);
        assert_ne!(bus.read32(NFC_ST) & NFC_ST_CMD_INT, 0);
    }

    #[test]
    fn data_transfer_fills_scratch_from_latched_address() {
        let cfg = NandConfig::default();
        let mut bus = SimBus::new(cfg);
        bus.write32(NFC_ADDR_LOW, (3 << 16) | 0x400);
        bus.write32(NFC_ADDR_HIGH, 0);
        bus.write32(DMAC_BC, cfg.page_size);
        bus.write32(DMAC_CFG, DMAC_LOADING);
        bus.write32(NFC_CMD, NFC_DATA_TRANS);

        assert_ne!(bus.read32(NFC_ST) & NFC_ST_DMA_INT, 0);
        assert_eq!(bus.read32(DMAC_CFG) & DMAC_LOADING, 0);
        let flat = 3 * cfg.block_size + 0x400;
        assert_eq!(bus.scratch()[0], image_byte(flat));
        assert_eq!(bus.scratch()[17], image_byte(flat + 17));
    }

    #[test]
    fn wedged_completion_keeps_loading_set() {
        let cfg = NandConfig::default();
        let mut bus = SimBus::new(cfg).wedge_dma_completion_from(0);
        bus.write32(DMAC_BC, cfg.page_size);
        bus.write32(DMAC_CFG, DMAC_LOADING);
        bus.write32(NFC_CMD, NFC_DATA_TRANS);

        assert_ne!(bus.read32(NFC_ST) & NFC_ST_DMA_INT, 0);
        assert_ne!(bus.read32(DMAC_CFG) & DMAC_LOADING, 0);
    }

    #[test]
    fn ecc_injection_sets_status_for_chosen_transfer() {
        let cfg = NandConfig::default();
        let mut bus = SimBus::new(cfg).ecc_errors_on(&[1]);
        for _ in 0..2 {
            bus.write32(DMAC_BC, cfg.page_size);
            bus.write32(DMAC_CFG, DMAC_LOADING);
            bus.write32(NFC_CMD, NFC_DATA_TRANS);
        }
        assert_eq!(bus.read32(NFC_ECC_ST), 1);
    }
}
