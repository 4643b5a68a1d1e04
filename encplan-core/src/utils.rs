//! Arithmetic and formatting helpers.
//!
//! The rounding and ratio helpers are shared by the geometry resolver and
//! the estimator; the formatting helpers are used by report printers.

/// Greatest common divisor. `gcd(0, 0)` is 0.
#[must_use]
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Reduces `num/den` to lowest terms. Returns `None` when either side is zero.
#[must_use]
pub fn reduce_ratio(num: u64, den: u64) -> Option<(u64, u64)> {
    if num == 0 || den == 0 {
        return None;
    }
    let divisor = gcd(num, den);
    Some((num / divisor, den / divisor))
}

/// Rounds `value` to the nearest multiple of `modulus`, ties rounding up.
///
/// The result is never smaller than `modulus`. A modulus of 0 or 1 leaves
/// the value untouched.
#[must_use]
pub fn round_to_modulus(value: i64, modulus: i64) -> i64 {
    if modulus <= 1 {
        return value;
    }
    let remainder = value.rem_euclid(modulus);
    let lower = value - remainder;
    let rounded = if remainder * 2 >= modulus {
        lower + modulus
    } else {
        lower
    };
    rounded.max(modulus)
}

/// Splits `total` into a leading and trailing share; the leading side gets
/// the floor and the trailing side the remainder.
#[must_use]
pub fn split_even(total: i64) -> (i64, i64) {
    let lead = total.div_euclid(2);
    (lead, total - lead)
}

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

/// Formats a size given in MiB with two decimals, switching to GiB above 1024.
#[must_use]
pub fn format_megabytes(megabytes: f64) -> String {
    if !megabytes.is_finite() || megabytes < 0.0 {
        return "? MiB".to_string();
    }
    if megabytes >= 1024.0 {
        format!("{:.2} GiB", megabytes / 1024.0)
    } else {
        format!("{megabytes:.2} MiB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(12, 0), 12);
        assert_eq!(gcd(1920, 1080), 120);
        assert_eq!(gcd(32, 27), 1);
    }

    #[test]
    fn test_reduce_ratio() {
        assert_eq!(reduce_ratio(1920, 1080), Some((16, 9)));
        assert_eq!(reduce_ratio(4, 4), Some((1, 1)));
        assert_eq!(reduce_ratio(0, 5), None);
        assert_eq!(reduce_ratio(5, 0), None);
    }

    #[test]
    fn test_round_to_modulus() {
        assert_eq!(round_to_modulus(853, 2), 854); // tie rounds up
        assert_eq!(round_to_modulus(852, 2), 852);
        assert_eq!(round_to_modulus(1279, 16), 1280);
        assert_eq!(round_to_modulus(1287, 16), 1280);
        assert_eq!(round_to_modulus(1288, 16), 1296); // tie rounds up
        assert_eq!(round_to_modulus(1, 16), 16);
        assert_eq!(round_to_modulus(0, 2), 2);
        assert_eq!(round_to_modulus(721, 1), 721);
        assert_eq!(round_to_modulus(721, 0), 721);
    }

    #[test]
    fn test_split_even() {
        assert_eq!(split_even(0), (0, 0));
        assert_eq!(split_even(10), (5, 5));
        assert_eq!(split_even(11), (5, 6));
        assert_eq!(split_even(-3), (-2, -1));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(5400.0), "01:30:00");
        assert_eq!(format_duration(3725.9), "01:02:05");
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::NAN), "??:??:??");
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(700.0), "700.00 MiB");
        assert_eq!(format_megabytes(2048.0), "2.00 GiB");
        assert_eq!(format_megabytes(-1.0), "? MiB");
    }
}
