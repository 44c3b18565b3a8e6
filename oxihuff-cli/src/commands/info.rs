//! Info command implementation.

use crate::utils::format_size;
use oxihuff_codec::{PSEUDO_EOF, StreamInfo, inspect, is_huffman_stream};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON output for the info command.
#[derive(Debug, Serialize)]
struct InfoJson<'a> {
    file: String,
    magic_hex: String,
    #[serde(flatten)]
    info: &'a StreamInfo,
}

pub fn cmd_info(file: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    if !is_huffman_stream(&data) {
        return Err(format!("{} is not an OxiHuff stream", file.display()).into());
    }
    let info = inspect(&data)?;

    if json {
        return print_json(file, &info);
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", file.display());
    println!("Magic: {:#010X}", info.magic);
    println!("Size: {}", format_size(info.compressed_bytes));
    println!();
    println!("Header:");
    println!("  Tree header: {} bits", info.header_bits);
    println!("  Leaves: {} ({} byte values + end marker)", info.leaf_count, info.literal_count());
    println!("  Longest code: {} bits", info.max_code_length);
    println!("  Payload capacity: {} bits", info.payload_capacity_bits());
    println!();
    println!("{:>8} {:>6}", "Symbol", "Length");
    println!("{}", "-".repeat(15));
    for code in &info.codes {
        println!("{:>8} {:>6}", symbol_label(code.symbol), code.length);
    }

    Ok(())
}

fn print_json(file: &Path, info: &StreamInfo) -> Result<(), Box<dyn std::error::Error>> {
    let output = InfoJson {
        file: file.display().to_string(),
        magic_hex: format!("{:#010X}", info.magic),
        info,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn symbol_label(symbol: u16) -> String {
    match symbol {
        PSEUDO_EOF => "EOF".to_string(),
        0x21..=0x7E => format!("'{}'", symbol as u8 as char),
        _ => format!("{:#04x}", symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_on_foreign_file() {
        let dir = crate::utils::scratch_dir("info-foreign");
        let file = dir.join("plain.txt");
        fs::write(&file, b"just text").unwrap();

        let err = cmd_info(&file, false).unwrap_err();
        assert!(err.to_string().contains("not an OxiHuff stream"));

        let packed = dir.join("packed.hf");
        fs::write(&packed, oxihuff_codec::compress(b"just text").unwrap()).unwrap();
        assert!(cmd_info(&packed, true).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_symbol_label() {
        assert_eq!(symbol_label(b'a' as u16), "'a'");
        assert_eq!(symbol_label(b' ' as u16), "0x20");
        assert_eq!(symbol_label(0), "0x00");
        assert_eq!(symbol_label(PSEUDO_EOF), "EOF");
    }
}
