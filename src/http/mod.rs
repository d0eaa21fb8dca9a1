//! HTTP protocol layer module
//!
//! Content-Type inference, ETag handling, Range parsing, and response
//! builders. Kept free of tenant and markdown business logic.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use range::parse_range_header;
pub use response::{
    build_error_response, build_html_response, build_not_modified_response,
    build_plain_response, build_static_response,
};
