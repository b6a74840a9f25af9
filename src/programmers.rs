//! Programmer registration and dispatch
//!
//! Centralized registry for the bus backends the CLI can drive, with
//! dynamic help text generation.

use nandboot_core::{NandBus, NandConfig};
use nandboot_sim::SimBus;
use nandboot_sunxi::PhysBus;

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    vec![
        ProgrammerInfo {
            name: "phys",
            aliases: &["internal"],
            description: "Memory-mapped A20 NAND controller via /dev/mem - requires root",
        },
        ProgrammerInfo {
            name: "sim",
            aliases: &["dummy"],
            description: "In-memory controller emulator for testing",
        },
    ]
}

/// Comma-separated programmer names for help text
pub fn programmer_names_short() -> String {
    available_programmers()
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Open the bus backend selected by name
pub fn open_bus(name: &str, cfg: &NandConfig) -> Result<Box<dyn NandBus>, Box<dyn std::error::Error>> {
    let matches = |info: &ProgrammerInfo| info.name == name || info.aliases.contains(&name);

    match available_programmers().iter().find(|p| matches(p)) {
        Some(info) if info.name == "phys" => Ok(Box::new(PhysBus::new(cfg.page_size)?)),
        Some(_) => Ok(Box::new(SimBus::new(*cfg))),
        None => Err(format!(
            "unknown programmer '{}' (available: {})",
            name,
            programmer_names_short()
        )
        .into()),
    }
}
