//! Clock gating and pin multiplexing for the NAND controller
//!
//! One-time SoC plumbing performed before any NFC register is touched:
//! route the port C pins to their NAND function, gate on the controller's
//! AHB bus clock and enable the module clock with its divider. Synchronous
//! and side-effect-complete on return.

use nandboot_core::NandBus;

use crate::regs::*;

/// Bring up the NAND controller's clocks and pins
pub fn set_clocks<B: NandBus + ?Sized>(bus: &mut B) {
    log::debug!("configuring NAND pin mux and clocks");

    bus.write32(
        PORTC_BASE + PORTC_PC_CFG0,
        PORTC_PC_CFG0_NRB1
            | PORTC_PC_CFG0_NRB0
            | PORTC_PC_CFG0_NRE
            | PORTC_PC_CFG0_NCE0
            | PORTC_PC_CFG0_NCE1
            | PORTC_PC_CFG0_NCLE
            | PORTC_PC_CFG0_NALE
            | PORTC_PC_CFG0_NWE,
    );

    bus.write32(
        PORTC_BASE + PORTC_PC_CFG1,
        PORTC_PC_CFG1_NDQ7
            | PORTC_PC_CFG1_NDQ6
            | PORTC_PC_CFG1_NDQ5
            | PORTC_PC_CFG1_NDQ4
            | PORTC_PC_CFG1_NDQ3
            | PORTC_PC_CFG1_NDQ2
            | PORTC_PC_CFG1_NDQ1
            | PORTC_PC_CFG1_NDQ0,
    );

    bus.write32(
        PORTC_BASE + PORTC_PC_CFG2,
        PORTC_PC_CFG2_NCE7
            | PORTC_PC_CFG2_NCE6
            | PORTC_PC_CFG2_NCE5
            | PORTC_PC_CFG2_NCE4
            | PORTC_PC_CFG2_NCE3
            | PORTC_PC_CFG2_NCE2
            | PORTC_PC_CFG2_NWP,
    );

    bus.write32(PORTC_BASE + PORTC_PC_CFG3, PORTC_PC_CFG3_NDQS);

    let val = bus.read32(CCU_BASE + CCU_AHB_GATING_REG0);
    bus.write32(
        CCU_BASE + CCU_AHB_GATING_REG0,
        val | CCU_AHB_GATING_REG0_NAND,
    );

    let val = bus.read32(CCU_BASE + CCU_NAND_SCLK_CFG_REG);
    bus.write32(
        CCU_BASE + CCU_NAND_SCLK_CFG_REG,
        val | CCU_NAND_SCLK_CFG_REG_SCLK_GATING | CCU_NAND_SCLK_CFG_REG_CLK_DIV_RATIO,
    );
}
