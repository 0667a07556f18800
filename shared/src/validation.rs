//! Submit-time validation rules for the dashboard forms

use rust_decimal::Decimal;

use crate::calculators::reconcile;
use crate::models::{BirdType, SexSplit};

// ============================================================================
// General Validations
// ============================================================================

/// Validate that a text field is not blank
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate that a count is at least 1
pub fn validate_positive_count(value: u32) -> Result<(), &'static str> {
    if value == 0 {
        return Err("Value must be greater than zero");
    }
    Ok(())
}

/// Validate phone number format: 7-15 digits, separators and a leading '+' allowed
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err("Phone number may only contain digits, spaces and dashes");
    }

    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must have between 7 and 15 digits");
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate shrinkage per bird is not negative
pub fn validate_shrinkage(shrinkage_kg: Decimal) -> Result<(), &'static str> {
    if shrinkage_kg < Decimal::ZERO {
        return Err("Shrinkage cannot be negative");
    }
    Ok(())
}

/// Validate that a bird type with varieties declares at least one
pub fn validate_bird_type_flags(has_variety: bool, varieties: &[String]) -> Result<(), &'static str> {
    if has_variety && varieties.iter().all(|v| v.trim().is_empty()) {
        return Err("At least one variety is required");
    }
    if !has_variety && !varieties.is_empty() {
        return Err("Varieties are only allowed when the bird type has varieties");
    }
    Ok(())
}

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate a batch's variety and sex split against its bird type
pub fn validate_batch_for_type(
    bird_type: &BirdType,
    variety: Option<&str>,
    total_birds: u32,
    sex_split: Option<SexSplit>,
) -> Result<(), &'static str> {
    validate_batch_variety(bird_type, variety)?;
    validate_batch_sex_split(bird_type, total_birds, sex_split)
}

/// Validate that a variety is given iff the bird type has varieties
pub fn validate_batch_variety(bird_type: &BirdType, variety: Option<&str>) -> Result<(), &'static str> {
    match (bird_type.has_variety, variety) {
        (true, None) => Err("Variety is required for this bird type"),
        (true, Some(v)) if !bird_type.offers_variety(v) => Err("Variety is not offered by this bird type"),
        (false, Some(_)) => Err("This bird type has no varieties"),
        _ => Ok(()),
    }
}

/// Validate that a sex split is given iff the bird type tracks sex, and that it adds up
pub fn validate_batch_sex_split(
    bird_type: &BirdType,
    total_birds: u32,
    sex_split: Option<SexSplit>,
) -> Result<(), &'static str> {
    match (bird_type.has_sex, sex_split) {
        (true, None) => Err("Male and female counts are required for this bird type"),
        (true, Some(split)) => {
            if reconcile(total_birds, split.males, split.females).is_balanced {
                Ok(())
            } else {
                Err("Male and female counts must add up to the total birds")
            }
        }
        (false, Some(_)) => Err("This bird type does not track sex"),
        (false, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pollo() -> BirdType {
        BirdType::new("Pollo").with_sex()
    }

    fn gallina() -> BirdType {
        BirdType::new("Gallina").with_varieties(["Roja", "Negra"])
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Pollo").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn test_validate_positive_count() {
        assert!(validate_positive_count(1).is_ok());
        assert!(validate_positive_count(0).is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("987654321").is_ok());
        assert!(validate_phone("987-654-321").is_ok());
        assert!(validate_phone("+51 987 654 321").is_ok());
        assert!(validate_phone("4251234").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("9876543210123456").is_err());
        assert!(validate_phone("98765432a").is_err());
        assert!(validate_phone("").is_err());
    }

    // ========================================================================
    // Catalog Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_shrinkage() {
        assert!(validate_shrinkage(Decimal::ZERO).is_ok());
        assert!(validate_shrinkage(Decimal::from_str("0.15").unwrap()).is_ok());
        assert!(validate_shrinkage(Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_bird_type_flags() {
        assert!(validate_bird_type_flags(false, &[]).is_ok());
        assert!(validate_bird_type_flags(true, &["Roja".to_string()]).is_ok());
        assert!(validate_bird_type_flags(true, &[]).is_err());
        assert!(validate_bird_type_flags(true, &[" ".to_string()]).is_err());
        assert!(validate_bird_type_flags(false, &["Roja".to_string()]).is_err());
    }

    // ========================================================================
    // Inventory Validation Tests
    // ========================================================================

    #[test]
    fn test_batch_with_balanced_split() {
        let split = SexSplit {
            males: 80,
            females: 70,
        };
        assert!(validate_batch_for_type(&pollo(), None, 150, Some(split)).is_ok());
    }

    #[test]
    fn test_batch_with_unbalanced_split() {
        let split = SexSplit {
            males: 80,
            females: 60,
        };
        assert!(validate_batch_for_type(&pollo(), None, 150, Some(split)).is_err());
    }

    #[test]
    fn test_batch_missing_split() {
        assert!(validate_batch_for_type(&pollo(), None, 150, None).is_err());
    }

    #[test]
    fn test_batch_split_on_type_without_sex() {
        let pato = BirdType::new("Pato");
        let split = SexSplit {
            males: 10,
            females: 10,
        };
        assert!(validate_batch_for_type(&pato, None, 20, Some(split)).is_err());
        assert!(validate_batch_for_type(&pato, None, 20, None).is_ok());
    }

    #[test]
    fn test_batch_variety_rules() {
        assert!(validate_batch_for_type(&gallina(), Some("Roja"), 40, None).is_ok());
        assert!(validate_batch_for_type(&gallina(), None, 40, None).is_err());
        assert!(validate_batch_for_type(&gallina(), Some("Blanca"), 40, None).is_err());
        assert!(validate_batch_for_type(&pollo(), Some("Roja"), 40, None).is_err());
    }
}
