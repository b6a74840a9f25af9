//! nandboot - boot-style NAND page reader for the Allwinner A20
//!
//! Reads an arbitrary byte range out of raw NAND the way the A20 boot ROM
//! does: syndrome-coded early pages, per-page data randomization, and
//! DMA-drained one-page transactions against the memory-mapped flash
//! controller.
//!
//! ECC errors are reported but never change the exit status; the read
//! entry point's only quality signal is the accumulated ECC-error count.

mod cli;
mod commands;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Read {
            output,
            source,
            size,
            programmer,
            geometry,
        } => {
            let cfg = geometry.to_config();
            cfg.validate()?;
            let bus = programmers::open_bus(&programmer, &cfg)?;
            commands::read::run_read(bus, cfg, source, size, &output)
        }
        Commands::Programmers => {
            for info in programmers::available_programmers() {
                if info.aliases.is_empty() {
                    println!("  {:<8} {}", info.name, info.description);
                } else {
                    println!(
                        "  {:<8} {} (aliases: {})",
                        info.name,
                        info.description,
                        info.aliases.join(", ")
                    );
                }
            }
            Ok(())
        }
    }
}
