//! Vehicles, radios and their checkout records.

use crate::error::CoreError;

/// Maximum length of a vehicle plate.
pub const MAX_PLATE_LENGTH: usize = 10;

/// Normalize a vehicle plate: trimmed, uppercased, without inner spaces or dashes.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Validate a (normalized) vehicle plate.
pub fn validate_plate(plate: &str) -> Result<(), CoreError> {
    if plate.is_empty() {
        return Err(CoreError::missing_field("plate"));
    }
    if plate.chars().count() > MAX_PLATE_LENGTH {
        return Err(CoreError::Validation(format!(
            "plate must be at most {MAX_PLATE_LENGTH} characters"
        )));
    }
    if !plate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "plate may only contain letters and digits".to_string(),
        ));
    }
    Ok(())
}

/// Kilometres driven during a vehicle checkout.
pub fn distance_travelled(odometer_start: i32, odometer_end: i32) -> Result<i32, CoreError> {
    if odometer_start < 0 {
        return Err(CoreError::Validation(
            "odometer_start cannot be negative".to_string(),
        ));
    }
    if odometer_end < odometer_start {
        return Err(CoreError::Validation(format!(
            "odometer_end ({odometer_end}) cannot be lower than odometer_start ({odometer_start})"
        )));
    }
    Ok(odometer_end - odometer_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plates_are_normalized() {
        assert_eq!(normalize_plate(" ab-cd 12 "), "ABCD12");
    }

    #[test]
    fn plate_validation() {
        assert!(validate_plate("ABCD12").is_ok());
        assert!(validate_plate("").is_err());
        assert!(validate_plate("AB*12").is_err());
        assert!(validate_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn distance_is_end_minus_start() {
        assert_eq!(distance_travelled(1000, 1250).unwrap(), 250);
        assert_eq!(distance_travelled(1000, 1000).unwrap(), 0);
    }

    #[test]
    fn odometer_cannot_go_backwards() {
        assert!(distance_travelled(1000, 999).is_err());
        assert!(distance_travelled(-1, 10).is_err());
    }
}
