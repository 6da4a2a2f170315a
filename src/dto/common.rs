//! Envelope de respuesta y tipos de paginación compartidos por toda la API

use serde::{Deserialize, Serialize};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}

/// Query params de paginación (`?page=&limit=`)
///
/// Los valores se parsean como enteros en el extractor y se normalizan
/// aquí: nunca se confía en coerciones implícitas de strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    /// Normalizar a (page, limit) con límites sanos
    pub fn normalize(&self, default_limit: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        (page, limit)
    }

    pub fn offset(page: i64, limit: i64) -> i64 {
        (page - 1) * limit
    }
}

/// Metadatos de paginación del envelope de listados
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // ceil(total / limit), sin pasar por floats
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            current_page: page,
            total_pages,
            total_items: total,
            has_next_page: page * limit < total,
            has_previous_page: page > 1,
        }
    }
}

/// Listado paginado
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_arithmetic() {
        // 25 items, 10 por página -> 3 páginas
        let meta = PaginationMeta::new(1, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);

        let meta = PaginationMeta::new(3, 10, 25);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);

        // límite exacto: 20 items, 10 por página
        let meta = PaginationMeta::new(2, 10, 20);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_pagination_query_normalize() {
        let query = PaginationQuery {
            page: Some(0),
            limit: Some(500),
        };
        let (page, limit) = query.normalize(10);
        assert_eq!(page, 1);
        assert_eq!(limit, 100);

        let query = PaginationQuery::default();
        let (page, limit) = query.normalize(20);
        assert_eq!(page, 1);
        assert_eq!(limit, 20);

        assert_eq!(PaginationQuery::offset(3, 10), 20);
    }
}
