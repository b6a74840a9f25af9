//! CLI argument parsing

use crate::programmers;
use clap::{Parser, Subcommand};
use nandboot_core::NandConfig;
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Generate dynamic help text for the programmer argument
fn programmer_help() -> String {
    format!(
        "Programmer to use [available: {}]",
        programmers::programmer_names_short()
    )
}

#[derive(Parser)]
#[command(name = "nandboot")]
#[command(author, version, about = "Boot-style NAND page reader", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// NAND layout overrides shared across commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeometryArgs {
    /// ECC strength (bits correctable per 1 KiB)
    #[arg(long)]
    pub ecc_strength: Option<u32>,

    /// Controller sub-page size in bytes (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32)]
    pub page_size: Option<u32>,

    /// Physical NAND page size in bytes (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32)]
    pub block_size: Option<u32>,

    /// Offsets below this boundary use syndrome addressing (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32)]
    pub syndrome_boundary: Option<u32>,
}

impl GeometryArgs {
    /// Apply the overrides on top of the built-in defaults
    pub fn to_config(&self) -> NandConfig {
        let mut cfg = NandConfig::default();
        if let Some(v) = self.ecc_strength {
            cfg.ecc_strength = v;
        }
        if let Some(v) = self.page_size {
            cfg.page_size = v;
        }
        if let Some(v) = self.block_size {
            cfg.block_size = v;
        }
        if let Some(v) = self.syndrome_boundary {
            cfg.syndrome_boundary = v;
        }
        cfg
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a byte range from NAND to a file
    Read {
        /// Output file path
        output: PathBuf,

        /// Source offset in flash (hex, e.g. 0x400000)
        #[arg(value_parser = parse_hex_u32)]
        source: u32,

        /// Number of bytes to read (hex or decimal)
        #[arg(value_parser = parse_hex_u32)]
        size: u32,

        /// Programmer to use
        #[arg(short, long, default_value = "phys", help = programmer_help())]
        programmer: String,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// List available programmers
    Programmers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_decimal_parsing() {
        assert_eq!(parse_hex_u32("0x400000"), Ok(0x40_0000));
        assert_eq!(parse_hex_u32("0X2000"), Ok(0x2000));
        assert_eq!(parse_hex_u32("1024"), Ok(1024));
        assert!(parse_hex_u32("0xZZ").is_err());
        assert!(parse_hex_u32("twelve").is_err());
    }

    #[test]
    fn geometry_overrides_apply() {
        let args = GeometryArgs {
            ecc_strength: Some(24),
            block_size: Some(0x4000),
            ..Default::default()
        };
        let cfg = args.to_config();
        assert_eq!(cfg.ecc_strength, 24);
        assert_eq!(cfg.block_size, 0x4000);
        assert_eq!(cfg.page_size, NandConfig::default().page_size);
    }
}
