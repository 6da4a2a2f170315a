pub mod common;

pub use common::{ApiResponse, Paginated, PaginationMeta, PaginationQuery};
