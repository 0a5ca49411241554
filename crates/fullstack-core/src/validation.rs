//! # Validation Module
//!
//! Input validation for everything that enters the storefront core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page views (client)                                          │
//! │  ├── Disable "Add" on taken domains, hide quantity for domains         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── NewCartItem::new  (id, name, price)                               │
//! │  ├── validate_search_query (domain labels)                             │
//! │  └── validate_email / _password / _customer_name (sign-in page)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                         │
//! │  └── Total operations only: nothing left to reject                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_DOMAIN_LABEL_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ITEM_ID_LEN: usize = 255;
const MAX_ITEM_NAME_LEN: usize = 200;
const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Shortest password the sign-in page accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Cart Item Validators
// =============================================================================

/// Validates a line item key.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 255 characters (a full domain name fits)
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a line item display name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free add-ons)
///
/// ```rust
/// use fullstack_core::money::Money;
/// use fullstack_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Domain Search
// =============================================================================

/// Validates and normalises a domain search query into a single DNS label.
///
/// ## Rules
/// - Trimmed and lowercased
/// - Must not be empty, at most 63 characters
/// - Only ASCII letters, digits and hyphens
/// - Must not start or end with a hyphen
///
/// ## Returns
/// The normalised label, ready to be combined with a TLD.
///
/// ```rust
/// use fullstack_core::validation::validate_search_query;
///
/// assert_eq!(validate_search_query("  MyBrand ").unwrap(), "mybrand");
/// assert!(validate_search_query("").is_err());
/// assert!(validate_search_query("-brand").is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let label = query.trim().to_lowercase();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if label.len() > MAX_DOMAIN_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_DOMAIN_LABEL_LEN,
        });
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "query".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::InvalidFormat {
            field: "query".to_string(),
            reason: "must not start or end with a hyphen".to_string(),
        });
    }

    Ok(label)
}

// =============================================================================
// Session
// =============================================================================

/// Validates an email address for sign-in.
///
/// Loose check: one `@`, a non-empty local part, and a dot somewhere
/// inside the domain part.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "Email".to_string(),
        });
    }

    let invalid = || ValidationError::Invalid {
        field: "Email".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }

    match domain.find('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates the display name given at registration.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "Name".to_string(),
        });
    }

    if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "Name".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a password for login or registration.
///
/// ## Rules
/// - Required
/// - At least [`MIN_PASSWORD_LEN`] characters
///
/// Passwords are not trimmed: surrounding spaces are part of the secret.
///
/// ```rust
/// use fullstack_core::validation::validate_password;
///
/// assert!(validate_password("hunter22").is_ok());
/// assert_eq!(
///     validate_password("abc").unwrap_err().to_string(),
///     "Password must be at least 6 characters"
/// );
/// ```
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "Password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Checks the confirmation field of the registration form.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> ValidationResult<()> {
    if confirm.is_empty() {
        return Err(ValidationError::ConfirmationRequired);
    }

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("example.com").is_ok());
        assert!(validate_item_id("hosting-2").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Starter Hosting").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("startup").unwrap(), "startup");
        assert_eq!(validate_search_query("My-Brand2").unwrap(), "my-brand2");

        assert!(validate_search_query("  ").is_err());
        assert!(validate_search_query("has space").is_err());
        assert!(validate_search_query("brand.com").is_err());
        assert!(validate_search_query("brand-").is_err());
        assert!(validate_search_query(&"a".repeat(64)).is_err());
        assert!(validate_search_query(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@fullstack.rw").is_ok());
        assert!(validate_email("a.b@mail.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("jane").is_err());
        assert!(validate_email("@fullstack.rw").is_err());
        assert!(validate_email("jane@localhost").is_err());
        assert!(validate_email("jane@.rw").is_err());
        assert!(validate_email("jane@rw.").is_err());
        assert!(validate_email("ja ne@fullstack.rw").is_err());
    }

    #[test]
    fn test_email_messages() {
        assert_eq!(validate_email("").unwrap_err().to_string(), "Email is required");
        assert_eq!(validate_email("jane").unwrap_err().to_string(), "Email is invalid");
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Jane Mukamana").is_ok());
        assert_eq!(
            validate_customer_name("   ").unwrap_err().to_string(),
            "Name is required"
        );
        assert!(validate_customer_name(&"J".repeat(101)).is_err());
        // Looser than cart line names would allow
        assert!(validate_item_name(&"J".repeat(150)).is_ok());
        assert!(validate_customer_name(&"J".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password(" a b c ").is_ok());

        assert_eq!(
            validate_password("").unwrap_err(),
            ValidationError::Required {
                field: "Password".to_string()
            }
        );
        assert_eq!(
            validate_password("12345").unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_validate_password_confirmation() {
        assert!(validate_password_confirmation("secret1", "secret1").is_ok());
        assert_eq!(
            validate_password_confirmation("secret1", ""),
            Err(ValidationError::ConfirmationRequired)
        );
        assert_eq!(
            validate_password_confirmation("secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
