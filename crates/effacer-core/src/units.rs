//! Fixed-width duration and throughput formatting for the summary table

/// Split a duration in whole seconds into hours, minutes, and seconds.
///
/// Pure integer arithmetic, no rounding: `3661` becomes `(1, 1, 1)`.
pub fn seconds_to_hms(total_seconds: u64) -> (u64, u64, u64) {
    let mut minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let hours = if minutes > 59 {
        let hours = minutes / 60;
        minutes %= 60;
        hours
    } else {
        0
    };
    (hours, minutes, seconds)
}

/// Render a byte rate as a 3-character right-justified magnitude plus unit.
///
/// Thresholds are powers of 1000, not 1024, and the magnitude uses
/// truncating division, so `2_500_000_000` renders as `"  2 GB"`. The `/s`
/// suffix is left to the caller.
pub fn throughput_label(bytes_per_sec: u64) -> String {
    const TB: u64 = 1_000_000_000_000;
    const GB: u64 = 1_000_000_000;
    const MB: u64 = 1_000_000;
    const KB: u64 = 1_000;

    if bytes_per_sec >= TB {
        format!("{:>3} TB", bytes_per_sec / TB)
    } else if bytes_per_sec >= GB {
        format!("{:>3} GB", bytes_per_sec / GB)
    } else if bytes_per_sec >= MB {
        format!("{:>3} MB", bytes_per_sec / MB)
    } else if bytes_per_sec >= KB {
        format!("{:>3} KB", bytes_per_sec / KB)
    } else {
        format!("{bytes_per_sec:>3} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_hms() {
        assert_eq!(seconds_to_hms(0), (0, 0, 0));
        assert_eq!(seconds_to_hms(59), (0, 0, 59));
        assert_eq!(seconds_to_hms(60), (0, 1, 0));
        assert_eq!(seconds_to_hms(3600), (1, 0, 0));
        assert_eq!(seconds_to_hms(3661), (1, 1, 1));
        assert_eq!(seconds_to_hms(59 * 60 + 59), (0, 59, 59));
        assert_eq!(seconds_to_hms(25 * 3600), (25, 0, 0));
    }

    #[test]
    fn test_throughput_label_units() {
        assert_eq!(throughput_label(0), "  0 B");
        assert_eq!(throughput_label(999), "999 B");
        assert_eq!(throughput_label(1000), "  1 KB");
        assert_eq!(throughput_label(999_999), "999 KB");
        assert_eq!(throughput_label(1_000_000), "  1 MB");
        assert_eq!(throughput_label(120_000_000), "120 MB");
        assert_eq!(throughput_label(1_000_000_000), "  1 GB");
        assert_eq!(throughput_label(1_000_000_000_000), "  1 TB");
    }

    #[test]
    fn test_throughput_label_truncates() {
        // 2.5 GB/s truncates down, never rounds up.
        assert_eq!(throughput_label(2_500_000_000), "  2 GB");
        assert_eq!(throughput_label(1_999), "  1 KB");
    }
}
