//! Message computation for the daily post.
//!
//! The bot posts today's date in Japan Standard Time, read as a `YYYYMMDD`
//! integer, together with its prime factorization, e.g. `20240101 = 7 * 41 * 109 * 647`.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// UTC offset of Japan Standard Time, in seconds.
const JST_OFFSET_SECS: i32 = 9 * 60 * 60;

/// Returns the prime factors of `number` in ascending order, with multiplicity.
///
/// Numbers below 2 have no prime factors and yield an empty vector.
///
/// # Example
///
/// ```rust
/// use primepost::calc::prime_factorize;
///
/// assert_eq!(prime_factorize(360), vec![2, 2, 2, 3, 3, 5]);
/// assert!(prime_factorize(1).is_empty());
/// ```
pub fn prime_factorize(mut number: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut candidate = 2u64;

    while candidate.saturating_mul(candidate) <= number {
        while number % candidate == 0 {
            factors.push(candidate);
            number /= candidate;
        }
        candidate += 1;
    }
    if number >= 2 {
        factors.push(number);
    }

    factors
}

/// Current calendar date in Japan Standard Time (UTC+9).
pub fn today_in_jst() -> NaiveDate {
    date_in_jst(Utc::now())
}

/// Calendar date of `instant` in Japan Standard Time (UTC+9).
pub fn date_in_jst(instant: DateTime<Utc>) -> NaiveDate {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => instant.with_timezone(&jst).date_naive(),
        // Unreachable for an in-range offset.
        None => instant.date_naive(),
    }
}

/// Reads a date as the decimal number `YYYYMMDD`.
pub fn date_number(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or_default();
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

/// Formats `number` and its factorization as `"{number} = f1 * f2 * ..."`.
pub fn compose_message(number: u64) -> String {
    let factors: Vec<String> = prime_factorize(number)
        .iter()
        .map(u64::to_string)
        .collect();
    format!("{} = {}", number, factors.join(" * "))
}

/// Composes the message for today's date in JST.
pub fn todays_message() -> String {
    compose_message(date_number(today_in_jst()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_factorize() {
        let cases: [(u64, &[u64]); 8] = [
            (0, &[]),
            (1, &[]),
            (2, &[2]),
            (12, &[2, 2, 3]),
            (25, &[5, 5]),
            (97, &[97]),
            (360, &[2, 2, 2, 3, 3, 5]),
            (20240101, &[7, 41, 109, 647]),
        ];

        for (input, expected) in cases {
            assert_eq!(prime_factorize(input), expected, "factorizing {}", input);
        }
    }

    #[test]
    fn test_prime_factorize_large_prime_date() {
        assert_eq!(prime_factorize(20250101), vec![20250101]);
    }

    #[test]
    fn test_date_number() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(date_number(date), 20261015);
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date_number(date), 20240229);
    }

    #[test]
    fn test_date_in_jst_rolls_over_at_fifteen_utc() {
        let before = "2026-10-14T14:59:59Z".parse::<DateTime<Utc>>().unwrap();
        let after = "2026-10-14T15:00:00Z".parse::<DateTime<Utc>>().unwrap();

        assert_eq!(date_in_jst(before), NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(date_in_jst(after), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }

    #[test]
    fn test_compose_message() {
        assert_eq!(compose_message(20261015), "20261015 = 5 * 37 * 109519");
        assert_eq!(compose_message(20240101), "20240101 = 7 * 41 * 109 * 647");
        assert_eq!(compose_message(1), "1 = ");
    }

    #[test]
    fn test_todays_message_round_trips_through_factors() {
        let message = todays_message();
        let (number, factors) = message.split_once(" = ").unwrap();
        let product: u64 = factors
            .split(" * ")
            .map(|f| f.parse::<u64>().unwrap())
            .product();
        assert_eq!(product.to_string(), number);
    }
}
