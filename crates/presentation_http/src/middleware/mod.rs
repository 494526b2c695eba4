//! HTTP middleware components
//!
//! Origin checking, security headers and validated JSON extraction.

pub mod origin_check;
pub mod security_headers;
pub mod validation;

pub use origin_check::{OriginCheck, OriginCheckLayer};
pub use security_headers::{SecurityHeaders, SecurityHeadersLayer};
pub use validation::{FieldViolation, ValidatedJson, ValidationError};
