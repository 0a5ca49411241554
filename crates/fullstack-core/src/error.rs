//! # Error Types
//!
//! Domain-specific error types for fullstack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fullstack-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog / quote / parsing failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fullstack-store errors (separate crate)                               │
//! │  ├── StoreError       - Checkout gating, config loading                │
//! │  └── ApiError         - What the web client sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never appear here: they are total over validated input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No hosting plan with this id in the catalog.
    #[error("Hosting plan not found: {0}")]
    PlanNotFound(u32),

    /// The domain cannot be added to the cart because it is taken.
    ///
    /// ## User Workflow
    /// ```text
    /// Search "startup" ──► startup.com (taken) ──► click "Add"
    ///      │
    ///      ▼
    /// DomainUnavailable("startup.com") ──► toast: "startup.com is taken"
    /// ```
    #[error("Domain is not available for registration: {0}")]
    DomainUnavailable(String),

    /// A decimal amount string could not be parsed into money.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Unknown billing cycle name.
    #[error("Invalid billing cycle '{0}', expected 'monthly' or 'yearly'")]
    InvalidBillingCycle(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything reaches the cart, so the cart itself never has to
/// reject input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is not acceptable (e.g., a malformed email).
    #[error("{field} is invalid")]
    Invalid { field: String },

    /// The confirmation field of a password pair was left empty.
    #[error("Please confirm your password")]
    ConfirmationRequired,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., bad domain label, bad email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
