//! UTC day keys.

use chrono::{DateTime, Utc};

/// Day key for the current UTC instant.
pub fn day_key() -> String {
    day_key_at(Utc::now())
}

/// Day key (`YYYY-MM-DD`) for a UTC instant.
///
/// The key rolls over at UTC midnight regardless of the caller's local
/// timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use garb_quota::day_key_at;
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
/// assert_eq!(day_key_at(instant), "2024-01-01");
/// ```
pub fn day_key_at(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn keys_roll_over_at_utc_midnight() {
        let before = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap();
        assert_eq!(day_key_at(before), "2024-01-01");
        assert_eq!(day_key_at(after), "2024-01-02");
        assert_ne!(day_key_at(before), day_key_at(after));
    }

    #[test]
    fn keys_are_zero_padded() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(day_key_at(instant), "2024-03-07");
    }
}
