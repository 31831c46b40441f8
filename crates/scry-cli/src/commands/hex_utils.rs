//! Hex address parsing and formatting utilities.

use anyhow::Result;
use scry_core::RemoteAddress;

/// Parse a hex address string (with or without 0x prefix).
///
/// # Examples
///
/// ```ignore
/// use crate::commands::hex_utils::parse_hex_address;
///
/// assert_eq!(parse_hex_address("0x1000").unwrap(), 0x1000);
/// assert_eq!(parse_hex_address("1000").unwrap(), 0x1000);
/// ```
pub fn parse_hex_address(s: &str) -> Result<u64> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(s, 16).map_err(|e| anyhow::anyhow!("Invalid hex address: {}", e))
}

pub fn parse_remote_address(s: &str) -> Result<RemoteAddress> {
    parse_hex_address(s).map(RemoteAddress::new)
}

pub fn parse_remote_addresses(values: &[String]) -> Result<Vec<RemoteAddress>> {
    values.iter().map(|s| parse_remote_address(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_address_with_prefix() {
        assert_eq!(parse_hex_address("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_address("0X1000").unwrap(), 0x1000);
    }

    #[test]
    fn test_parse_hex_address_without_prefix() {
        assert_eq!(parse_hex_address("1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_address("DEADBEEF").unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn test_parse_hex_address_large() {
        assert_eq!(parse_hex_address("0x7FF6A0B1C2D0").unwrap(), 0x7FF6A0B1C2D0);
    }

    #[test]
    fn test_parse_hex_address_invalid() {
        assert!(parse_hex_address("GHIJK").is_err());
        assert!(parse_hex_address("0xZZZ").is_err());
    }

    #[test]
    fn test_parse_remote_addresses() {
        let parsed =
            parse_remote_addresses(&["0x10".to_string(), "20".to_string()]).unwrap();
        assert_eq!(parsed, vec![RemoteAddress::new(0x10), RemoteAddress::new(0x20)]);
        assert!(parse_remote_addresses(&["0x10".to_string(), "nope".to_string()]).is_err());
    }
}
