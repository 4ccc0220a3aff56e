//! Popularity counter parsing
//!
//! Likes and subscriber counts arrive as display strings such as `"1.2M"`,
//! `"850K"` or `"12,345"`. They are normalized once at load time into plain
//! numbers. Anything that does not parse is reported as
//! [`PopularityError::Malformed`] and stored as unavailable by the loader.

use thiserror::Error;

/// A counter that could not be read as a suffix-scaled number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopularityError {
    #[error("Malformed popularity value: {0:?}")]
    Malformed(String),
}

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

/// Parse a popularity counter into a plain number.
///
/// # Examples
/// ```
/// use toonrec_core::popularity::parse_popularity;
///
/// assert_eq!(parse_popularity("1.2M").unwrap(), 1_200_000.0);
/// assert_eq!(parse_popularity("850K").unwrap(), 850_000.0);
/// assert_eq!(parse_popularity("12,345").unwrap(), 12_345.0);
/// assert!(parse_popularity("N/A").is_err());
/// ```
pub fn parse_popularity(raw: &str) -> Result<f64, PopularityError> {
    let value = raw.trim();
    let malformed = || PopularityError::Malformed(raw.to_string());

    if value.is_empty() {
        return Err(malformed());
    }

    let (digits, scale) = match value.chars().last() {
        Some('M') | Some('m') => (&value[..value.len() - 1], MILLION),
        Some('K') | Some('k') => (&value[..value.len() - 1], THOUSAND),
        _ => (value, 1.0),
    };

    let digits: String = digits.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(malformed());
    }

    let number: f64 = digits.parse().map_err(|_| malformed())?;
    Ok(number * scale)
}

/// Parse an optional counter, mapping malformed input to `None`
pub fn parse_popularity_opt(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match parse_popularity(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_scaling() {
        assert_eq!(parse_popularity("1.2M"), Ok(1_200_000.0));
        assert_eq!(parse_popularity("850K"), Ok(850_000.0));
        assert!((parse_popularity("22.9M").unwrap() - 22_900_000.0).abs() < 1e-6);
        assert_eq!(parse_popularity(" 3K "), Ok(3_000.0));
    }

    #[test]
    fn test_plain_digits_with_separators() {
        assert_eq!(parse_popularity("12,345"), Ok(12_345.0));
        assert_eq!(parse_popularity("999"), Ok(999.0));
        assert_eq!(parse_popularity("1,234,567"), Ok(1_234_567.0));
    }

    #[test]
    fn test_fractional_values_are_kept() {
        assert!((parse_popularity("12.7").unwrap() - 12.7).abs() < 1e-9);
        assert!((parse_popularity("1.2345K").unwrap() - 1_234.5).abs() < 1e-9);
        assert!((parse_popularity("0.5").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(parse_popularity("N/A"), Err(PopularityError::Malformed(_))));
        assert!(parse_popularity("").is_err());
        assert!(parse_popularity("M").is_err());
        assert!(parse_popularity("-5K").is_err());
        assert!(parse_popularity("1.2.3").is_err());
        assert!(parse_popularity("lots").is_err());
    }

    #[test]
    fn test_optional_maps_malformed_to_none() {
        assert_eq!(parse_popularity_opt(Some("N/A")), None);
        assert_eq!(parse_popularity_opt(None), None);
        assert_eq!(parse_popularity_opt(Some("10K")), Some(10_000.0));
    }
}
