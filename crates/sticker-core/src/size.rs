//! Byte budgets and human-readable sizes.

/// Largest encoded image the downstream generation model accepts.
pub const DEFAULT_BYTE_BUDGET: usize = 4 * 1024 * 1024;

/// Inputs below this size (and within budget) skip normalization.
pub const SMALL_IMAGE_THRESHOLD: usize = 1024 * 1024;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// True when `bytes` fits in `budget`.
pub fn validate_size(bytes: &[u8], budget: usize) -> bool {
    bytes.len() <= budget
}

/// Format a byte count with base-1024 units and at most two decimals.
///
/// ```ignore
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / divisor as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert!(validate_size(&[], 0));
        assert!(validate_size(&[0; 10], 10));
        assert!(!validate_size(&[0; 11], 10));
    }

    #[test]
    fn test_default_budgets() {
        assert_eq!(DEFAULT_BYTE_BUDGET, 4_194_304);
        assert_eq!(SMALL_IMAGE_THRESHOLD, 1_048_576);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(4_404_019), "4.2 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024 * 1024), "10 GB");
    }

    #[test]
    fn test_format_file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_format_file_size_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.205078...
        assert_eq!(format_file_size(1234), "1.21 KB");
    }
}
