//! # Error Handling
//!
//! Provides the unified `AppError` enum used for construction-time failures
//! (duplicate type names, malformed path templates, unknown HTTP methods).
//!
//! Validation and routing failures are *data*, not errors: they are returned
//! as ordered lists of human-readable strings so callers can accumulate them.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Errors detected while assembling a specification index.
    /// Created explicitly so `From<String>` stays with General.
    #[from(ignore)]
    #[display("Specification Error: {_0}")]
    Spec(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        // String defaults to General, not Spec
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_spec_manual_creation() {
        // Spec errors must be created explicitly
        let app_err = AppError::Spec("duplicate type".into());
        assert_eq!(format!("{}", app_err), "Specification Error: duplicate type");
    }
}
