//! Request-side models: validation and list filters
//!
//! Invalid input returns ValidationError, not panic.

pub mod filters;
pub mod validation;

pub use filters::{DateRange, ListParams};
pub use validation::{required, required_text, ValidationError};
