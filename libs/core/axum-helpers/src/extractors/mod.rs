//! Custom extractors shared by the domain routers.

pub mod pagination;
pub mod uuid_path;
pub mod validated_json;

pub use pagination::Pagination;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
