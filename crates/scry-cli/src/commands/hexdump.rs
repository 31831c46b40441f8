//! Hexdump command implementation.
//!
//! Displays raw bytes from a snapshot in traditional hexdump format, useful
//! for checking structure layouts against the offset table.
//!
//! # Output Format
//!
//! ```text
//! 0x000: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scry_core::{MemorySnapshot, ReadMemory};

/// Format bytes as hexdump lines
pub fn format_lines(bytes: &[u8], ascii: bool) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = format!("0x{:03X}: ", i * 16);

            for j in 0..16 {
                if j == 8 {
                    line.push(' ');
                }
                match chunk.get(j) {
                    Some(byte) => line.push_str(&format!("{:02X} ", byte)),
                    None => line.push_str("   "),
                }
            }

            if ascii {
                line.push_str(" |");
                for byte in chunk {
                    if (0x20..0x7F).contains(byte) {
                        line.push(*byte as char);
                    } else {
                        line.push('.');
                    }
                }
                for _ in chunk.len()..16 {
                    line.push(' ');
                }
                line.push('|');
            }

            line
        })
        .collect()
}

/// Run the hexdump command
pub fn run(snapshot: &MemorySnapshot, address: u64, size: usize, ascii: bool) -> Result<()> {
    let bytes = snapshot
        .read_bytes(address, size)
        .with_context(|| format!("Failed to read {} bytes at 0x{:X}", size, address))?;

    println!(
        "{}",
        format!("Hexdump at 0x{:X} ({} bytes):", address, size).bold()
    );
    println!();

    for line in format_lines(&bytes, ascii) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line_with_ascii() {
        let lines = format_lines(b"Hello World\0\0\0\0\0", true);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "0x000: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|"
        );
    }

    #[test]
    fn test_partial_line_is_padded() {
        let bytes: Vec<u8> = (0..20).collect();
        let lines = format_lines(&bytes, true);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0x010: 10 11 12 13 "));
        assert!(lines[1].ends_with("|....            |"));
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_without_ascii() {
        let lines = format_lines(&[0xAB; 4], false);
        assert!(!lines[0].contains('|'));
        assert!(lines[0].starts_with("0x000: AB AB AB AB"));
    }
}
