//! Capa de acceso a datos
//!
//! Helpers compartidos: mapeo de violaciones de unicidad (SQLSTATE 23505)
//! a conflictos de dominio y escapado de comodines para patrones ILIKE.

pub mod booking_repository;
pub mod faq_repository;
pub mod favorite_repository;
pub mod review_repository;
pub mod support_repository;
pub mod user_repository;
pub mod vehicle_repository;

use crate::utils::errors::AppError;

/// Traducir una violación de unicidad en un 409 con mensaje de dominio.
/// Cualquier otro error de base de datos se propaga sin tocar.
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}

/// Patrón `%...%` para ILIKE con los comodines del término escapados.
/// Sin esto, una búsqueda de `%` coincidiría con todo el catálogo.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().chars() {
        if c == '\\' || c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[derive(Debug)]
    struct UniqueViolation;

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "duplicate key value violates unique constraint \"idx_bookings_no_duplicates\""
            )
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    fn unique_violation() -> sqlx::Error {
        sqlx::Error::Database(Box::new(UniqueViolation))
    }

    #[test]
    fn test_unique_violation_becomes_domain_conflict() {
        let err = conflict_on_unique(
            unique_violation(),
            "You already have an active booking for this vehicle on this date",
        );
        match err {
            AppError::Conflict(msg) => assert_eq!(
                msg,
                "You already have an active booking for this vehicle on this date"
            ),
            other => panic!("expected conflict, got {:?}", other),
        }

        let err = conflict_on_unique(unique_violation(), "Vehicle is already in favorites");
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Vehicle is already in favorites"));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let err = conflict_on_unique(sqlx::Error::RowNotFound, "should not appear");
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("honda"), "%honda%");
        assert_eq!(like_pattern("  honda "), "%honda%");
        assert_eq!(like_pattern("%"), "%\\%%");
        assert_eq!(like_pattern("_"), "%\\_%");
        assert_eq!(like_pattern("50\\50"), "%50\\\\50%");
        assert_eq!(like_pattern("100%_ev"), "%100\\%\\_ev%");
    }
}
