pub mod engine;
pub mod error;
pub mod http;
pub mod query;
pub mod schema;

pub use error::{ApiError, ResolveError};
pub use schema::{Source, build_schema, build_schema_with_root};
