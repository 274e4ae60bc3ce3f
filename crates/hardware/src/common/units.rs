//! Memory size parsing.
//!
//! Sizes follow the simulator convention where the decimal-looking suffixes are
//! binary multiples: `kB` is 1024 bytes, `MB` is 1024² bytes, and so on. The IEC
//! spellings (`KiB`, `MiB`, ...) are accepted as synonyms.

use super::error::ConfigError;

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;

/// Returns the multiplier for a size suffix, or `None` if the suffix is unknown.
fn multiplier(suffix: &str) -> Option<u64> {
    match suffix {
        "" | "B" => Some(1),
        "k" | "kB" | "KB" | "KiB" => Some(KIB),
        "M" | "MB" | "MiB" => Some(MIB),
        "G" | "GB" | "GiB" => Some(GIB),
        "T" | "TB" | "TiB" => Some(TIB),
        _ => None,
    }
}

/// Parses a memory size string into bytes.
///
/// # Arguments
///
/// * `text` - Size such as `"512MB"`, `"16kB"`, `"4096"`, or `"1GiB"`.
///
/// # Returns
///
/// The size in bytes, or `ConfigError::InvalidSize` for a missing number,
/// an unknown suffix, or a value that overflows 64 bits.
pub fn parse_size(text: &str) -> Result<u64, ConfigError> {
    let trimmed = text.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(digits_end);

    let invalid = || ConfigError::InvalidSize(text.to_string());
    if number.is_empty() {
        return Err(invalid());
    }
    let value: u64 = number.parse().map_err(|_| invalid())?;
    let scale = multiplier(suffix.trim_start()).ok_or_else(invalid)?;
    value.checked_mul(scale).ok_or_else(invalid)
}
