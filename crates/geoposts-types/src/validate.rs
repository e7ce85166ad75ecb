use std::num::{IntErrorKind, ParseIntError};

use thiserror::Error;

pub const LOCATION_DESCRIPTION_MAX: usize = 80;
pub const POST_TITLE_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Field must be at most {max} characters long.")]
    TooLong { max: usize },

    #[error("Not a valid number.")]
    NotANumber,

    #[error("Not a valid integer value.")]
    NotAnInteger,

    #[error("Number must be between {min} and {max}.")]
    OutOfRange { min: f64, max: f64 },
}

/// Parse a decimal degree and check it against `[min, max]`.
fn parse_degrees(raw: &str, min: f64, max: f64) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    let value: f64 = raw.parse().map_err(|_| FieldError::NotANumber)?;
    if !value.is_finite() {
        return Err(FieldError::NotANumber);
    }
    if value < min || value > max {
        return Err(FieldError::OutOfRange { min, max });
    }
    Ok(value)
}

pub fn parse_latitude(raw: &str) -> Result<f64, FieldError> {
    parse_degrees(raw, -90.0, 90.0)
}

pub fn parse_longitude(raw: &str) -> Result<f64, FieldError> {
    parse_degrees(raw, -180.0, 180.0)
}

/// Parse a non-negative integer such as a radius or a result cap.
pub fn parse_count(raw: &str) -> Result<u32, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    raw.parse::<u32>().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => FieldError::OutOfRange {
            min: 0.0,
            max: f64::from(u32::MAX),
        },
        _ => FieldError::NotAnInteger,
    })
}

/// Length limit counted in characters, not bytes.
pub fn check_max_len(value: &str, max: usize) -> Result<(), FieldError> {
    if value.chars().count() > max {
        return Err(FieldError::TooLong { max });
    }
    Ok(())
}

pub fn check_required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_bounds() {
        assert_eq!(parse_latitude("52.5"), Ok(52.5));
        assert_eq!(parse_latitude(" -90 "), Ok(-90.0));
        assert_eq!(
            parse_latitude("90.01"),
            Err(FieldError::OutOfRange { min: -90.0, max: 90.0 })
        );
        assert_eq!(parse_latitude("notanumber"), Err(FieldError::NotANumber));
        assert_eq!(parse_latitude("NaN"), Err(FieldError::NotANumber));
        assert_eq!(parse_latitude(""), Err(FieldError::Required));
    }

    #[test]
    fn longitude_bounds() {
        assert_eq!(parse_longitude("-180"), Ok(-180.0));
        assert!(parse_longitude("180.5").is_err());
        assert!(parse_longitude("inf").is_err());
    }

    #[test]
    fn counts_are_non_negative_integers() {
        assert_eq!(parse_count("1000"), Ok(1000));
        assert_eq!(parse_count("-5"), Err(FieldError::NotAnInteger));
        assert_eq!(parse_count("1.5"), Err(FieldError::NotAnInteger));
        assert_eq!(parse_count(""), Err(FieldError::Required));
    }

    #[test]
    fn count_overflow_is_out_of_range() {
        let err = parse_count("99999999999").unwrap_err();
        assert_eq!(
            err,
            FieldError::OutOfRange {
                min: 0.0,
                max: 4294967295.0
            }
        );
        assert_eq!(err.to_string(), "Number must be between 0 and 4294967295.");
        assert_eq!(parse_count("4294967295"), Ok(u32::MAX));
    }

    #[test]
    fn max_len_counts_chars() {
        let umlauts = "ä".repeat(LOCATION_DESCRIPTION_MAX);
        assert!(check_max_len(&umlauts, LOCATION_DESCRIPTION_MAX).is_ok());
        let too_long = "x".repeat(LOCATION_DESCRIPTION_MAX + 1);
        assert_eq!(
            check_max_len(&too_long, LOCATION_DESCRIPTION_MAX),
            Err(FieldError::TooLong { max: 80 })
        );
    }

    #[test]
    fn required_rejects_whitespace() {
        assert_eq!(check_required("   "), Err(FieldError::Required));
        assert!(check_required("Hello").is_ok());
    }
}
