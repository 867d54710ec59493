//! Time utilities: stopwatch display formatting.

/// Format elapsed milliseconds as `H:MM:SS.CC`.
///
/// Hours are not padded and centiseconds are truncated, never rounded.
/// Negative input renders as zero.
pub fn format_elapsed(ms: i64) -> String {
    let ms = ms.max(0);
    let centis = (ms % 1000) / 10;
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, centis)
}

#[cfg(test)]
mod tests {
    use super::format_elapsed;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0), "0:00:00.00");
    }

    #[test]
    fn truncates_centiseconds() {
        assert_eq!(format_elapsed(1234), "0:00:01.23");
        assert_eq!(format_elapsed(1239), "0:00:01.23");
        assert_eq!(format_elapsed(9), "0:00:00.00");
    }

    #[test]
    fn rolls_minutes_and_hours() {
        assert_eq!(format_elapsed(61_000), "0:01:01.00");
        assert_eq!(format_elapsed(3_600_000), "1:00:00.00");
        assert_eq!(format_elapsed(36_125_990), "10:02:05.99");
    }

    #[test]
    fn clamps_negative() {
        assert_eq!(format_elapsed(-50), "0:00:00.00");
    }
}
