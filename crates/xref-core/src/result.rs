//! Result type alias for cross-reference operations

use crate::error::XrefError;

/// Standard Result type for cross-reference operations
pub type Result<T> = std::result::Result<T, XrefError>;
