//! Utility functions for formatting durations, sizes, and ffmpeg timestamps.

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Parses an FFmpeg time string (HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

/// Calculates the percentage size reduction from input to output.
/// Returns 0 if input_size is 0 to avoid division by zero.
#[must_use]
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> u64 {
    if input_size == 0 {
        0
    } else if output_size >= input_size {
        0 // No reduction if output is larger
    } else {
        100 - ((output_size * 100) / input_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.0), "00:00:59");
        assert_eq!(format_duration(60.0), "00:01:00");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(86399.0), "23:59:59");
        assert_eq!(format_duration(90061.0), "25:01:01");

        // Fractional seconds truncate
        assert_eq!(format_duration(59.9), "00:00:59");

        // Invalid inputs
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::INFINITY), "??:??:??");
        assert_eq!(format_duration(f64::NAN), "??:??:??");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KiB");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 2), "2.00 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GiB");
    }

    #[test]
    fn test_parse_ffmpeg_time() {
        assert_eq!(parse_ffmpeg_time("00:00:00"), Some(0.0));
        assert_eq!(parse_ffmpeg_time("00:01:00"), Some(60.0));
        assert_eq!(parse_ffmpeg_time("01:02:03"), Some(3723.0));
        assert_eq!(parse_ffmpeg_time("00:00:01.25"), Some(1.25));
        assert_eq!(parse_ffmpeg_time("01:30:45.75"), Some(5445.75));

        assert_eq!(parse_ffmpeg_time(""), None);
        assert_eq!(parse_ffmpeg_time("00:00"), None);
        assert_eq!(parse_ffmpeg_time("00:00:00:00"), None);
        assert_eq!(parse_ffmpeg_time("aa:bb:cc"), None);
    }

    #[test]
    fn test_calculate_size_reduction() {
        assert_eq!(calculate_size_reduction(100, 50), 50);
        assert_eq!(calculate_size_reduction(1000, 250), 75);
        assert_eq!(calculate_size_reduction(1000, 0), 100);
        assert_eq!(calculate_size_reduction(0, 100), 0);
        assert_eq!(calculate_size_reduction(100, 100), 0);
        assert_eq!(calculate_size_reduction(100, 150), 0); // Output larger
    }
}
