//! Bounded busy-poll of a masked status register
//!
//! The boot environment this protocol comes from has no scheduler to yield
//! to, so synchronization with the controller is a fixed-delay retry loop:
//! sample the status word, mask it, and either succeed or sleep one
//! millisecond and try again, up to a retry cap. Callers treat exhaustion
//! as fatal for the current page transaction.

use crate::bus::NandBus;

/// Retry cap for every status wait (10 samples, 1 ms apart)
pub const MAX_RETRIES: u32 = 10;

/// Poll `addr` until `(value & mask)` matches the wanted condition.
///
/// With `negate` false the wait succeeds when any masked bit is set; with
/// `negate` true it succeeds when all masked bits are clear. A condition
/// that already holds on the first sample returns immediately with no
/// delay. Returns false after exactly `max_retries` unsatisfied samples.
pub fn await_condition<B: NandBus + ?Sized>(
    bus: &mut B,
    addr: u32,
    mask: u32,
    max_retries: u32,
    negate: bool,
) -> bool {
    let mut retries = 0;
    loop {
        let val = bus.read32(addr) & mask;
        let satisfied = if negate { val == 0 } else { val != 0 };
        if satisfied {
            return true;
        }

        retries += 1;
        if retries >= max_retries {
            log::trace!(
                "poll of {:#010x} (mask {:#x}) exhausted after {} samples",
                addr,
                mask,
                retries
            );
            return false;
        }
        bus.delay_ms(1);
    }
}

/// Wait for any of `bits` to become set
pub fn wait_set<B: NandBus + ?Sized>(bus: &mut B, addr: u32, bits: u32, max_retries: u32) -> bool {
    await_condition(bus, addr, bits, max_retries, false)
}

/// Wait for all of `bits` to become clear
pub fn wait_clear<B: NandBus + ?Sized>(
    bus: &mut B,
    addr: u32,
    bits: u32,
    max_retries: u32,
) -> bool {
    await_condition(bus, addr, bits, max_retries, true)
}
