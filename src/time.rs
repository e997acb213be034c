//! Playback time formatting.

/// Format a position in seconds as `M:SS`.
///
/// Non-finite and negative values render as `0:00`. Minutes are not capped,
/// so an hour is `60:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn non_finite_and_negative_are_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
