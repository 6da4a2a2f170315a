//! Utilidades de validación
//!
//! Funciones helper usadas por los derives de `validator` y por los
//! controllers para reglas que el derive no cubre.

use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Patrón permisivo de teléfono: dígitos, +, -, espacios y paréntesis
fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9+\-\s()]{10,15}$").expect("invalid phone regex"))
}

/// Validar formato de teléfono
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !phone_regex().is_match(value) {
        let mut error = ValidationError::new("phone");
        error.message = Some("Please provide a valid phone number".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no esté en el pasado
pub fn validate_future_date(value: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *value < today {
        let mut error = ValidationError::new("future_date");
        error.message = Some("Preferred date cannot be in the past".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor numérico sea no negativo
///
/// Recibe referencia porque los campos validados (Decimal y opcionales)
/// llegan prestados desde el derive de `validator`.
pub fn validate_non_negative<T: PartialOrd + num_traits::Zero>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Value must be zero or positive".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un rating esté en el rango 1..=5
pub fn validate_rating(value: i16) -> Result<(), ValidationError> {
    if !(1..=5).contains(&value) {
        let mut error = ValidationError::new("rating");
        error.message = Some("Rating must be between 1 and 5".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91 98765-43210").is_ok());
        assert!(validate_phone("(011) 2345678").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("not-a-phone").is_err());
        assert!(validate_phone("12345678901234567890").is_err());
    }

    #[test]
    fn test_validate_future_date() {
        let today = Utc::now().date_naive();
        assert!(validate_future_date(&today).is_ok());
        assert!(validate_future_date(&(today + Duration::days(1))).is_ok());
        assert!(validate_future_date(&(today - Duration::days(1))).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&0.0).is_ok());
        assert!(validate_non_negative(&150.5).is_ok());
        assert!(validate_non_negative(&-0.1).is_err());

        // los precios llegan como Decimal, sin pasar por floats
        use rust_decimal::Decimal;
        use std::str::FromStr;
        assert!(validate_non_negative(&Decimal::from_str("89999.00").unwrap()).is_ok());
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
