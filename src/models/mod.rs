//! Data models for the DocuHub dashboard.
//!
//! These models serialize to the camelCase shapes the dashboard front-end consumes.

mod category;
mod document;
mod search;
mod tag;

pub use category::*;
pub use document::*;
pub use search::*;
pub use tag::*;
