//! Allwinner A20 NAND flash controller register definitions
//!
//! Register offsets and bit definitions for the NAND flash controller
//! (NFC), the dedicated DMA channel used to drain its data FIFO, and the
//! clock/pin-mux registers touched during bring-up.
//!
//! These values are the wire protocol of the controller and must match the
//! hardware bit-for-bit. Offsets are given relative to their block base;
//! the driver composes absolute addresses.

// ============================================================================
// NAND Flash Controller (NFC)
// ============================================================================

/// NFC register block base address
pub const NANDFLASHC_BASE: u32 = 0x01C0_3000;

/// Control register
pub const NANDFLASHC_CTL: u32 = 0x0000;
/// Status register
pub const NANDFLASHC_ST: u32 = 0x0004;
/// Interrupt enable register
pub const NANDFLASHC_INT: u32 = 0x0008;
/// Low address cycles: column and low 16 page bits
pub const NANDFLASHC_ADDR_LOW: u32 = 0x0014;
/// High address cycles: remaining page bits
pub const NANDFLASHC_ADDR_HIGH: u32 = 0x0018;
/// Sector count for data transfers
pub const NANDFLASHC_SECTOR_NUM: u32 = 0x001C;
/// Command register; writing it issues the command
pub const NANDFLASHC_CMD: u32 = 0x0024;
/// Read command set (cmd0 / random cmd0 / random cmd1)
pub const NANDFLASHC_RCMD_SET: u32 = 0x0028;
/// Data FIFO port, the DMA source
pub const NANDFLASHC_IO_DATA: u32 = 0x0030;
/// ECC control register
pub const NANDFLASHC_ECC_CTL: u32 = 0x0034;
/// ECC status register
pub const NANDFLASHC_ECC_ST: u32 = 0x0038;
/// Spare area offset register
pub const NANDFLASHC_SPARE_AREA: u32 = 0x00A0;

// NFC_CTL bits
/// Controller enable
pub const NFC_CTL_EN: u32 = 1 << 0;
/// Controller soft reset
pub const NFC_CTL_RESET: u32 = 1 << 1;
/// Route data through the internal RAM buffer
pub const NFC_CTL_RAM_METHOD: u32 = 1 << 14;

// NFC_ST bits
/// Command-interrupt: the issued command has been latched
pub const NFC_ST_CMD_INT: u32 = 1 << 1;
/// DMA-interrupt: the data transfer has been started
pub const NFC_ST_DMA_INT: u32 = 1 << 2;

// NFC_CMD bits and fields
/// Number of address cycles field offset
pub const NFC_ADDR_NUM_OFFSET: u32 = 16;
/// Send the address cycles
pub const NFC_SEND_ADR: u32 = 1 << 19;
/// Perform a data transfer
pub const NFC_DATA_TRANS: u32 = 1 << 21;
/// Send command 1
pub const NFC_SEND_CMD1: u32 = 1 << 22;
/// Wait for the ready/busy line
pub const NFC_WAIT_FLAG: u32 = 1 << 23;
/// Send command 2
pub const NFC_SEND_CMD2: u32 = 1 << 24;
/// Sequential-read modifier, used for syndrome pages
pub const NFC_SEQ: u32 = 1 << 25;
/// Swap data through the internal RAM buffer
pub const NFC_DATA_SWAP_METHOD: u32 = 1 << 26;
/// Page-oriented command
pub const NFC_PAGE_CMD: u32 = 2 << 30;

// NFC_RCMD_SET fields
/// Read command opcode offset
pub const NFC_READ_CMD_OFFSET: u32 = 0;
/// Random read command 0 opcode offset
pub const NFC_RANDOM_READ_CMD0_OFFSET: u32 = 8;
/// Random read command 1 opcode offset
pub const NFC_RANDOM_READ_CMD1_OFFSET: u32 = 16;

// NFC_ECC_CTL bits and fields
/// ECC engine enable
pub const NFC_ECC_EN: u32 = 1 << 0;
/// Pipeline ECC with the data transfer
pub const NFC_ECC_PIPELINE: u32 = 1 << 3;
/// Data randomization enable
pub const NFC_ECC_RANDOM_EN: u32 = 1 << 9;
/// ECC mode code field offset (bits 12..16)
pub const NFC_ECC_MODE_OFFSET: u32 = 12;
/// Randomizer seed field offset (bits 16..31)
pub const NFC_ECC_RANDOM_SEED_OFFSET: u32 = 16;

/// Reset/status-clear command issued before every page read
pub const NFC_CMD_RESET: u32 = 0xFF;

// ============================================================================
// Dedicated DMA (DDMA) channel 0
// ============================================================================

/// DMA controller register block base address
pub const DMAC_BASE: u32 = 0x01C0_2000;

/// DDMA channel 0 configuration register
pub const DMAC_CFG_REG0: u32 = 0x0300;
/// DDMA channel 0 source address
pub const DMAC_SRC_START_ADDR_REG0: u32 = 0x0304;
/// DDMA channel 0 destination address
pub const DMAC_DEST_START_ADDR_REG0: u32 = 0x0308;
/// DDMA channel 0 byte count
pub const DMAC_DDMA_BC_REG0: u32 = 0x030C;
/// DDMA channel 0 parameter register
pub const DMAC_DDMA_PARA_REG0: u32 = 0x0318;

// DDMA_CFG bits and fields
/// Channel busy/arm bit; set to start, clears on completion
pub const DMAC_DDMA_CFG_REG_LOADING: u32 = 1 << 31;
/// 32-bit destination data width
pub const DMAC_DDMA_CFG_REG_DMA_DEST_DATA_WIDTH_32: u32 = 2 << 25;
/// 32-bit source data width
pub const DMAC_DDMA_CFG_REG_DMA_SRC_DATA_WIDTH_32: u32 = 2 << 9;
/// Source address held constant (IO port)
pub const DMAC_DDMA_CFG_REG_DMA_SRC_ADDR_MODE_IO: u32 = 1 << 5;
/// Source DRQ: NAND flash controller
pub const DMAC_DDMA_CFG_REG_DDMA_SRC_DRQ_TYPE_NFC: u32 = 3 << 0;

// DDMA_PARA fields
/// Source wait cycles
pub const DMAC_DDMA_PARA_REG_SRC_WAIT_CYC: u32 = 0x0F << 0;
/// Source block size
pub const DMAC_DDMA_PARA_REG_SRC_BLK_SIZE: u32 = 0x7F << 8;

// ============================================================================
// Clock Control Unit (CCU)
// ============================================================================

/// CCU register block base address
pub const CCU_BASE: u32 = 0x01C2_0000;

/// AHB clock gating register 0
pub const CCU_AHB_GATING_REG0: u32 = 0x0060;
/// NAND bus clock gate
pub const CCU_AHB_GATING_REG0_NAND: u32 = 1 << 13;

/// NAND module clock configuration register
pub const CCU_NAND_SCLK_CFG_REG: u32 = 0x0080;
/// NAND module clock gate
pub const CCU_NAND_SCLK_CFG_REG_SCLK_GATING: u32 = 1 << 31;
/// Output clock divider ratio
pub const CCU_NAND_SCLK_CFG_REG_CLK_DIV_RATIO: u32 = 1;

// ============================================================================
// Port C pin multiplexing (PIO)
// ============================================================================

/// Port C register block base address
pub const PORTC_BASE: u32 = 0x01C2_0800;

/// Port C configuration register 0
pub const PORTC_PC_CFG0: u32 = 0x0048;
/// Port C configuration register 1
pub const PORTC_PC_CFG1: u32 = 0x004C;
/// Port C configuration register 2
pub const PORTC_PC_CFG2: u32 = 0x0050;
/// Port C configuration register 3
pub const PORTC_PC_CFG3: u32 = 0x0054;

// PC_CFG0: control lines, function 2 = NAND
pub const PORTC_PC_CFG0_NWE: u32 = 2 << 0;
pub const PORTC_PC_CFG0_NALE: u32 = 2 << 4;
pub const PORTC_PC_CFG0_NCLE: u32 = 2 << 8;
pub const PORTC_PC_CFG0_NCE1: u32 = 2 << 12;
pub const PORTC_PC_CFG0_NCE0: u32 = 2 << 16;
pub const PORTC_PC_CFG0_NRE: u32 = 2 << 20;
pub const PORTC_PC_CFG0_NRB0: u32 = 2 << 24;
pub const PORTC_PC_CFG0_NRB1: u32 = 2 << 28;

// PC_CFG1: data lines
pub const PORTC_PC_CFG1_NDQ0: u32 = 2 << 0;
pub const PORTC_PC_CFG1_NDQ1: u32 = 2 << 4;
pub const PORTC_PC_CFG1_NDQ2: u32 = 2 << 8;
pub const PORTC_PC_CFG1_NDQ3: u32 = 2 << 12;
pub const PORTC_PC_CFG1_NDQ4: u32 = 2 << 16;
pub const PORTC_PC_CFG1_NDQ5: u32 = 2 << 20;
pub const PORTC_PC_CFG1_NDQ6: u32 = 2 << 24;
pub const PORTC_PC_CFG1_NDQ7: u32 = 2 << 28;

// PC_CFG2: extra chip enables and write protect
pub const PORTC_PC_CFG2_NWP: u32 = 2 << 0;
pub const PORTC_PC_CFG2_NCE2: u32 = 2 << 4;
pub const PORTC_PC_CFG2_NCE3: u32 = 2 << 8;
pub const PORTC_PC_CFG2_NCE4: u32 = 2 << 12;
pub const PORTC_PC_CFG2_NCE5: u32 = 2 << 16;
pub const PORTC_PC_CFG2_NCE6: u32 = 2 << 20;
pub const PORTC_PC_CFG2_NCE7: u32 = 2 << 24;

// PC_CFG3: data strobe
pub const PORTC_PC_CFG3_NDQS: u32 = 2 << 0;
