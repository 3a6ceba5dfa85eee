use std::time::Duration;

const MIB: f64 = (1024 * 1024) as f64;
const GIB: f64 = (1024 * 1024 * 1024) as f64;

/// Whole megabytes, round-half-to-even (matches the reference backend's
/// rounding, so reported figures are reproducible across implementations).
pub fn bytes_to_mb(bytes: u64) -> u64 {
    (bytes as f64 / MIB).round_ties_even() as u64
}

/// Whole gigabytes, round-half-to-even.
pub fn bytes_to_gb(bytes: u64) -> u64 {
    (bytes as f64 / GIB).round_ties_even() as u64
}

/// Megabytes with 2 decimal digits, for cumulative traffic counters.
pub fn bytes_to_mb_2dp(bytes: u64) -> f64 {
    round_dp(bytes as f64 / MIB, 2)
}

pub fn round_dp(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

/// Uptime as `H:MM:SS`, prefixed with `N day(s), ` past 24 hours.
/// Sub-second remainder is truncated.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    match days {
        0 => format!("{hours}:{minutes:02}:{seconds:02}"),
        1 => format!("1 day, {hours}:{minutes:02}:{seconds:02}"),
        _ => format!("{days} days, {hours}:{minutes:02}:{seconds:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mb_rounding_is_half_to_even() {
        assert_eq!(bytes_to_mb(1024 * 1024 * 3 / 2), 2); // 1.5 -> 2
        assert_eq!(bytes_to_mb(1024 * 1024 * 5 / 2), 2); // 2.5 -> 2
        assert_eq!(bytes_to_mb(1024 * 1024 * 7 / 2), 4); // 3.5 -> 4
        assert_eq!(bytes_to_mb(8 * 1024 * 1024 * 1024), 8192);
    }

    #[test]
    fn gb_rounding() {
        assert_eq!(bytes_to_gb(0), 0);
        assert_eq!(bytes_to_gb(512 * 1024 * 1024 * 1024), 512);
        assert_eq!(bytes_to_gb(100 * 1024 * 1024), 0);
    }

    #[test]
    fn traffic_counters_keep_two_decimals() {
        assert_eq!(bytes_to_mb_2dp(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb_2dp(1_572_864), 1.5);
        assert_eq!(bytes_to_mb_2dp(1_048_576 + 10_486), 1.01);
    }

    #[test]
    fn uptime_under_a_day() {
        assert_eq!(format_uptime(Duration::ZERO), "0:00:00");
        assert_eq!(format_uptime(Duration::from_secs(7_384)), "2:03:04");
        assert_eq!(format_uptime(Duration::from_millis(59_900)), "0:00:59");
    }

    #[test]
    fn uptime_with_days() {
        assert_eq!(format_uptime(Duration::from_secs(86_400)), "1 day, 0:00:00");
        assert_eq!(
            format_uptime(Duration::from_secs(2 * 86_400 + 7_384)),
            "2 days, 2:03:04"
        );
    }
}
