//! # Store Error Types
//!
//! Errors raised around the cart: checkout gating, session sign-in and
//! configuration loading. The cart mutators themselves never fail.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Page view                   Rust                                       │
//! │  ─────────                   ────                                       │
//! │                                                                         │
//! │  "Proceed to Checkout"                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  prepare_checkout() ── no customer? ──► StoreError::NotSignedIn ──┐    │
//! │         │                                                          │    │
//! │         ├──────────── empty cart? ────► StoreError::EmptyCart ────┤    │
//! │         │                                                          ▼    │
//! │         ▼                                                   ApiError    │
//! │  CheckoutDraft                                  { code, message } ──►   │
//! │                                                                toast    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use fullstack_core::{CoreError, ValidationError};

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Everything that can go wrong outside the cart itself.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Checkout Gating
    // =========================================================================
    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Checkout was attempted without a signed-in customer.
    #[error("Please sign in to continue with checkout")]
    NotSignedIn,

    /// A draft was confirmed after the cart changed underneath it.
    #[error("Cart changed since checkout {draft_id} was prepared")]
    StaleCheckout { draft_id: String },

    // =========================================================================
    // Accounts
    // =========================================================================
    /// Unknown email or wrong password. Both report the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("An account with {email} already exists")]
    AccountExists { email: String },

    /// Hashing or parsing a stored password hash failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    // =========================================================================
    // Domain
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// What the web client receives when an operation fails.
///
/// ```json
/// { "code": "NOT_SIGNED_IN", "message": "Please sign in to continue with checkout" }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message, shown as a toast
    pub message: String,
}

/// Error codes for client payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyCart,
    NotSignedIn,
    /// The checkout draft no longer matches the cart; re-open checkout.
    StaleCheckout,
    InvalidCredentials,
    /// Registration clashed with an existing account.
    Conflict,
    NotFound,
    /// Domain is already registered.
    Unavailable,
    ValidationError,
    /// Configuration or I/O problem on our side.
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::EmptyCart => ErrorCode::EmptyCart,
            StoreError::NotSignedIn => ErrorCode::NotSignedIn,
            StoreError::StaleCheckout { .. } => ErrorCode::StaleCheckout,
            StoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
            StoreError::AccountExists { .. } => ErrorCode::Conflict,
            StoreError::Core(CoreError::PlanNotFound(_)) => ErrorCode::NotFound,
            StoreError::Core(CoreError::DomainUnavailable(_)) => ErrorCode::Unavailable,
            StoreError::Core(_) | StoreError::Validation(_) => ErrorCode::ValidationError,
            StoreError::PasswordHash(_)
            | StoreError::InvalidConfig(_)
            | StoreError::ConfigLoadFailed(_)
            | StoreError::ConfigSaveFailed(_)
            | StoreError::Io(_) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %err, "Internal storefront error");
                return ApiError::new(ErrorCode::Internal, "Something went wrong, please try again");
            }
        };

        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        StoreError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_errors_map_to_codes() {
        let api: ApiError = StoreError::EmptyCart.into();
        assert_eq!(api.code, ErrorCode::EmptyCart);
        assert_eq!(api.message, "Your cart is empty");

        let api: ApiError = StoreError::NotSignedIn.into();
        assert_eq!(api.code, ErrorCode::NotSignedIn);
    }

    #[test]
    fn test_account_errors_map_to_codes() {
        let api: ApiError = StoreError::InvalidCredentials.into();
        assert_eq!(api.code, ErrorCode::InvalidCredentials);
        assert_eq!(api.message, "Invalid email or password");

        let api: ApiError = StoreError::AccountExists {
            email: "jane@fullstack.rw".into(),
        }
        .into();
        assert_eq!(api.code, ErrorCode::Conflict);

        let api: ApiError = StoreError::PasswordHash("salt: invalid".into()).into();
        assert_eq!(api.code, ErrorCode::Internal);
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let api: ApiError = CoreError::DomainUnavailable("tech.com".into()).into();
        assert_eq!(api.code, ErrorCode::Unavailable);
        assert!(api.message.contains("tech.com"));

        let api: ApiError = CoreError::PlanNotFound(9).into();
        assert_eq!(api.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let api: ApiError = StoreError::ConfigLoadFailed("/etc/secret.toml: denied".into()).into();
        assert_eq!(api.code, ErrorCode::Internal);
        assert!(!api.message.contains("secret"));
    }

    #[test]
    fn test_api_error_json_shape() {
        let api = ApiError::new(ErrorCode::NotSignedIn, "Please sign in");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "NOT_SIGNED_IN");
        assert_eq!(json["message"], "Please sign in");
    }
}
