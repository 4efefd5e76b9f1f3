//! Custom extractors for Axum handlers.
//!
//! Each one rejects with the standard error envelope instead of axum's
//! plain-text rejection body.

pub mod path_param;
pub mod query_params;
pub mod validated_json;

pub use path_param::PathParam;
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
