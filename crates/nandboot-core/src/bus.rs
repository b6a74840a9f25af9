//! Bus abstraction over the controller's register space
//!
//! The driver only ever performs 32-bit register accesses at fixed physical
//! addresses, waits in millisecond steps, and reads back a one-page scratch
//! buffer that the DMA engine fills. Everything hardware-specific sits
//! behind this trait so the same transaction engine runs against `/dev/mem`
//! mappings or the in-memory simulator.

/// Register-level access to the flash controller, DMA engine and the
/// DMA-visible scratch page.
///
/// The scratch page lives with the bus because the DMA destination address
/// programmed into the controller must point at bus-visible memory. The
/// transaction engine holds the only `&mut` to the bus while a transfer is
/// in flight, so exactly one writer can touch the scratch page at a time.
pub trait NandBus {
    /// Read a 32-bit register at a physical address
    fn read32(&mut self, addr: u32) -> u32;

    /// Write a 32-bit register at a physical address
    fn write32(&mut self, addr: u32, value: u32);

    /// Delay between status-register samples
    ///
    /// Implementations backed by real hardware sleep; the simulator just
    /// counts invocations.
    fn delay_ms(&mut self, ms: u32);

    /// DMA-visible address of the scratch page, for programming the DMA
    /// destination register
    fn scratch_addr(&self) -> u32;

    /// Contents of the scratch page after a completed transfer
    fn scratch(&self) -> &[u8];

    /// Mutable scratch access, used to clear the page before a transfer
    fn scratch_mut(&mut self) -> &mut [u8];
}

#[cfg(feature = "std")]
impl<B: NandBus + ?Sized> NandBus for std::boxed::Box<B> {
    fn read32(&mut self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn scratch_addr(&self) -> u32 {
        (**self).scratch_addr()
    }

    fn scratch(&self) -> &[u8] {
        (**self).scratch()
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        (**self).scratch_mut()
    }
}

impl<B: NandBus + ?Sized> NandBus for &mut B {
    fn read32(&mut self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn scratch_addr(&self) -> u32 {
        (**self).scratch_addr()
    }

    fn scratch(&self) -> &[u8] {
        (**self).scratch()
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        (**self).scratch_mut()
    }
}
