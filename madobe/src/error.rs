use std::fmt;

use serde::{Deserialize, Serialize};

/// Result code returned by the monitor library's registration call.
///
/// Zero means the registration was accepted. Every other value belongs to
/// the monitor and passes through this crate unchanged; only the host gets
/// to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const SUCCESS: ErrorCode = ErrorCode(0);

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "success")
        } else {
            write!(f, "error code {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_zero() {
        assert!(ErrorCode::SUCCESS.is_success());
        assert!(!ErrorCode(2).is_success());
        assert!(!ErrorCode(-1).is_success());
    }

    #[test]
    fn test_foreign_codes_pass_through() {
        assert_eq!(ErrorCode(42).code(), 42);
        assert_eq!(ErrorCode(-7).code(), -7);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::SUCCESS.to_string(), "success");
        assert_eq!(ErrorCode(2).to_string(), "error code 2");
    }
}
