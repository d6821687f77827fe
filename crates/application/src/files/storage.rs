//! Human-readable size labels. Uploads arrive with sizes the browser
//! already formatted ("2.5 MB"); quota math parses them back into bytes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Flat 5 GB quota per account.
pub(crate) const STORAGE_QUOTA_BYTES: f64 = 5.0 * 1024.0 * 1024.0 * 1024.0;

static SIZE_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([\d.]+)\s*(B|KB|MB|GB)$").unwrap());

/// Parses "2.5 MB" into bytes. Labels that do not parse count as zero,
/// so one odd row cannot take down the stats endpoint.
pub(crate) fn parse_size_bytes(label: &str) -> f64 {
    let caps = match SIZE_LABEL_REGEX.captures(label) {
        Some(caps) => caps,
        None => return 0.0,
    };
    let value: f64 = match caps[1].parse() {
        Ok(value) => value,
        Err(_) => return 0.0,
    };
    let multiplier = match caps[2].to_uppercase().as_str() {
        "GB" => 1024.0 * 1024.0 * 1024.0,
        "MB" => 1024.0 * 1024.0,
        "KB" => 1024.0,
        _ => 1.0,
    };
    value * multiplier
}

/// Formats bytes with two decimals above the byte range, mirroring what
/// the upload form writes into the size column.
pub(crate) fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;

    if bytes >= GB {
        format!("{:.2} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_units() {
        assert_eq!(parse_size_bytes("512 B"), 512.0);
        assert_eq!(parse_size_bytes("2 KB"), 2048.0);
        assert_eq!(parse_size_bytes("2.5 MB"), 2.5 * 1024.0 * 1024.0);
        assert_eq!(parse_size_bytes("1 GB"), 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn parsing_is_case_insensitive_and_tolerates_missing_space() {
        assert_eq!(parse_size_bytes("2kb"), 2048.0);
        assert_eq!(parse_size_bytes("3.5mb"), 3.5 * 1024.0 * 1024.0);
        assert_eq!(parse_size_bytes("10KB"), 10240.0);
    }

    #[test]
    fn garbage_labels_count_as_zero() {
        assert_eq!(parse_size_bytes(""), 0.0);
        assert_eq!(parse_size_bytes("big"), 0.0);
        assert_eq!(parse_size_bytes("10 TB"), 0.0);
        assert_eq!(parse_size_bytes("MB 10"), 0.0);
        assert_eq!(parse_size_bytes("1..2 MB"), 0.0);
    }

    #[test]
    fn formats_round_trip_sensibly() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(2048.0), "2.00 KB");
        assert_eq!(format_bytes(2.5 * 1024.0 * 1024.0), "2.50 MB");
        assert_eq!(format_bytes(1.25 * 1024.0 * 1024.0 * 1024.0), "1.25 GB");
    }
}
