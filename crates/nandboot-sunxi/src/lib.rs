//! nandboot-sunxi - Allwinner A20 NAND flash controller driver
//!
//! Boot-style sequential page reads through the A20's NAND flash
//! controller (NFC): the boot ROM arrangement of syndrome-coded early
//! pages, per-page data randomization and DMA-drained transfers is
//! reproduced register-for-register.
//!
//! The driver is generic over [`nandboot_core::NandBus`]; pair it with
//! [`PhysBus`] on real hardware or with the `nandboot-sim` emulator for
//! tests and dry runs.

pub mod clocks;
pub mod controller;
pub mod phys;
pub mod regs;
pub mod seeds;

pub use controller::NandController;
pub use phys::PhysBus;
