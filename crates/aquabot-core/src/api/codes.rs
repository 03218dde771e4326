//! Backend error codes and their user-facing text.

use std::fmt;

/// Error codes the backend reports alongside `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    UserNotFound,
    InvalidCredentials,
    EmailExists,
    CodeExpired,
    InvalidCode,
    Unauthorized,
    /// A code this client does not translate; the backend message is shown.
    Other(String),
}

impl ApiErrorCode {
    /// Maps a raw code to its variant. Matching ignores case.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "USER_NOT_FOUND" => ApiErrorCode::UserNotFound,
            "INVALID_CREDENTIALS" | "INVALID_PASSWORD" => ApiErrorCode::InvalidCredentials,
            "EMAIL_EXISTS" | "USER_EXISTS" => ApiErrorCode::EmailExists,
            "CODE_EXPIRED" => ApiErrorCode::CodeExpired,
            "INVALID_CODE" => ApiErrorCode::InvalidCode,
            "UNAUTHORIZED" | "TOKEN_EXPIRED" => ApiErrorCode::Unauthorized,
            _ => ApiErrorCode::Other(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiErrorCode::UserNotFound => "USER_NOT_FOUND",
            ApiErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiErrorCode::EmailExists => "EMAIL_EXISTS",
            ApiErrorCode::CodeExpired => "CODE_EXPIRED",
            ApiErrorCode::InvalidCode => "INVALID_CODE",
            ApiErrorCode::Unauthorized => "UNAUTHORIZED",
            ApiErrorCode::Other(code) => code,
        }
    }

    /// Translated message, or `None` when the backend's own text should be
    /// shown.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ApiErrorCode::UserNotFound => Some("No account found with this email address."),
            ApiErrorCode::InvalidCredentials => Some("Incorrect email or password."),
            ApiErrorCode::EmailExists => Some("An account with this email already exists."),
            ApiErrorCode::CodeExpired => {
                Some("The verification code has expired. Please request a new one.")
            }
            ApiErrorCode::InvalidCode => Some("The verification code is incorrect."),
            ApiErrorCode::Unauthorized => Some("Your session has expired. Please log in again."),
            ApiErrorCode::Other(_) => None,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
