//! Read command implementation

use indicatif::{ProgressBar, ProgressStyle};
use nandboot_core::{NandBus, NandConfig};
use nandboot_sunxi::NandController;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run the read command
pub fn run_read<B: NandBus>(
    bus: B,
    cfg: NandConfig,
    source: u32,
    size: u32,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if source.checked_add(size).is_none() {
        return Err(format!(
            "read range 0x{:08X}+0x{:08X} exceeds the 32-bit flash address space",
            source, size
        )
        .into());
    }

    println!(
        "Reading 0x{:08X} bytes from NAND @ 0x{:08X}...",
        size, source
    );

    let mut ctrl = NandController::new(bus, cfg);
    let (data, ecc_errors) = read_with_progress(&mut ctrl, source, size as usize)?;

    let mut file = File::create(output)?;
    file.write_all(&data)?;

    println!("Wrote {} bytes to {:?}", data.len(), output);
    if ecc_errors > 0 {
        println!("ECC errors encountered: {}", ecc_errors);
    }

    Ok(())
}

/// Read a byte range page by page with a progress bar
fn read_with_progress<B: NandBus>(
    ctrl: &mut NandController<B>,
    source: u32,
    size: usize,
) -> Result<(Vec<u8>, u32), Box<dyn std::error::Error>> {
    let page_size = ctrl.config().page_size as usize;
    let mut data = vec![0u8; size];
    let mut ecc_errors = 0;

    let pb = ProgressBar::new(size as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
            .progress_chars("#>-"),
    );

    let mut offset = 0usize;
    while offset < size {
        let chunk_size = std::cmp::min(page_size, size - offset);
        let chunk = &mut data[offset..offset + chunk_size];

        ecc_errors += ctrl.read_image(source + offset as u32, chunk);

        offset += chunk_size;
        pb.set_position(offset as u64);
    }

    pb.finish_and_clear();
    Ok((data, ecc_errors))
}
