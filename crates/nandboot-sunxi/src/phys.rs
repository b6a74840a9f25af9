//! Physical memory backed bus for real hardware
//!
//! Maps the controller's register windows through `/dev/mem` and serves the
//! [`NandBus`] trait with volatile 32-bit accesses. Requires root and a
//! kernel that exposes the windows; Linux only.
//!
//! The scratch page is an ordinary word-aligned allocation whose address is
//! handed to the DMA engine, which assumes the 32-bit identity-mapped
//! environment the boot protocol was designed for.

use nandboot_core::{Error, NandBus, Result};

use crate::regs::{CCU_BASE, DMAC_BASE, NANDFLASHC_BASE};

/// Register windows needed by the driver: DMA controller, NFC, and the
/// shared CCU/PIO page for bring-up.
const WINDOWS: [(u32, usize); 3] = [
    (DMAC_BASE, 0x0400),
    (NANDFLASHC_BASE, 0x1000),
    (CCU_BASE, 0x1000),
];

/// One mapped register window
#[cfg(target_os = "linux")]
struct Window {
    base: u32,
    size: usize,
    ptr: *mut u8,
    map_size: usize,
}

/// `/dev/mem` backed implementation of [`NandBus`]
#[cfg(target_os = "linux")]
pub struct PhysBus {
    windows: Vec<Window>,
    scratch: Box<[u32]>,
}

#[cfg(target_os = "linux")]
impl PhysBus {
    /// Map the controller register windows and allocate the scratch page.
    ///
    /// `page_size` is the controller sub-page size; the scratch buffer is
    /// sized to hold exactly one.
    pub fn new(page_size: u32) -> Result<Self> {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;
        use std::os::unix::io::AsRawFd;

        // O_SYNC for uncached access, required for MMIO
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open("/dev/mem")
            .map_err(|_| Error::NotSupported("cannot open /dev/mem (root required)"))?;

        let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
        let page_mask = page - 1;

        let mut windows = Vec::with_capacity(WINDOWS.len());
        for (base, size) in WINDOWS {
            let offset = base as usize & page_mask;
            let aligned = (base as usize & !page_mask) as libc::off_t;
            let map_size = (size + offset + page_mask) & !page_mask;

            let ptr = unsafe {
                libc::mmap(
                    std::ptr::null_mut(),
                    map_size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_SHARED,
                    file.as_raw_fd(),
                    aligned,
                )
            };
            if ptr == libc::MAP_FAILED {
                return Err(Error::MemoryMap {
                    address: base,
                    size,
                });
            }

            windows.push(Window {
                base,
                size,
                ptr: unsafe { (ptr as *mut u8).add(offset) },
                map_size,
            });
        }

        let words = (page_size as usize + 3) / 4;
        Ok(Self {
            windows,
            scratch: vec![0u32; words].into_boxed_slice(),
        })
    }

    fn locate(&self, addr: u32) -> Option<(*mut u8, usize)> {
        self.windows
            .iter()
            .find(|w| addr >= w.base && (addr - w.base) as usize + 4 <= w.size)
            .map(|w| (w.ptr, (addr - w.base) as usize))
    }
}

#[cfg(target_os = "linux")]
impl NandBus for PhysBus {
    fn read32(&mut self, addr: u32) -> u32 {
        match self.locate(addr) {
            Some((ptr, offset)) => unsafe {
                core::ptr::read_volatile(ptr.add(offset) as *const u32)
            },
            None => {
                log::error!("read from unmapped register {:#010x}", addr);
                0
            }
        }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        match self.locate(addr) {
            Some((ptr, offset)) => unsafe {
                core::ptr::write_volatile(ptr.add(offset) as *mut u32, value);
            },
            None => log::error!("write to unmapped register {:#010x}", addr),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }

    fn scratch_addr(&self) -> u32 {
        self.scratch.as_ptr() as usize as u32
    }

    fn scratch(&self) -> &[u8] {
        unsafe {
            core::slice::from_raw_parts(self.scratch.as_ptr() as *const u8, self.scratch.len() * 4)
        }
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        unsafe {
            core::slice::from_raw_parts_mut(
                self.scratch.as_mut_ptr() as *mut u8,
                self.scratch.len() * 4,
            )
        }
    }
}

#[cfg(target_os = "linux")]
impl Drop for PhysBus {
    fn drop(&mut self) {
        let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
        let page_mask = page - 1;
        for w in &self.windows {
            let offset = w.base as usize & page_mask;
            unsafe {
                libc::munmap(w.ptr.sub(offset) as *mut libc::c_void, w.map_size);
            }
        }
    }
}

// Stub for non-Linux platforms
#[cfg(not(target_os = "linux"))]
pub struct PhysBus {
    _private: (),
}

#[cfg(not(target_os = "linux"))]
impl PhysBus {
    pub fn new(_page_size: u32) -> Result<Self> {
        Err(Error::NotSupported(
            "physical register access only supported on Linux",
        ))
    }
}

#[cfg(not(target_os = "linux"))]
impl NandBus for PhysBus {
    fn read32(&mut self, _addr: u32) -> u32 {
        0
    }
    fn write32(&mut self, _addr: u32, _value: u32) {}
    fn delay_ms(&mut self, _ms: u32) {}
    fn scratch_addr(&self) -> u32 {
        0
    }
    fn scratch(&self) -> &[u8] {
        &[]
    }
    fn scratch_mut(&mut self) -> &mut [u8] {
        &mut []
    }
}
