pub mod error_code;
pub mod pagination;
pub mod response;
pub mod string_enum;

pub use error_code::ErrorCode;
pub use pagination::{IncludeDeletedQuery, PaginatedResponse, PaginationMeta, PaginationQuery};
pub use response::ApiResponse;
