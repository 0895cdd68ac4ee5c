//! Client-side credential checks.
//!
//! Three pages accept a password and each applies its own policy: login has
//! no minimum, signup requires six characters, and the reset page requires
//! eight characters mixing upper case, lower case and digits.
//!
//! Lengths are counted in UTF-16 code units, the way a browser counts a form
//! field, so a character outside the Basic Multilingual Plane counts twice.

use babyshoe_core::Email;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ValidationError;

/// Minimum password length accepted by the signup form.
pub const SIGNUP_MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum password length accepted by the reset form.
pub const RESET_MIN_PASSWORD_LENGTH: usize = 8;

/// Parse an email entered in a form.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` if it does not look like `local@domain.tld`.
pub fn email(input: &str) -> Result<Email, ValidationError> {
    Email::parse(input).map_err(|_| ValidationError::InvalidEmail)
}

/// Check a password chosen at signup.
///
/// # Errors
///
/// Returns `ValidationError::PasswordTooShort` below six characters.
pub fn signup_password(password: &SecretString) -> Result<(), ValidationError> {
    if field_len(password) < SIGNUP_MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: SIGNUP_MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Check a new password and its confirmation on the reset page.
///
/// Checks run in order: confirmation, length, then character classes.
///
/// # Errors
///
/// Returns the first failed check.
pub fn reset_password(
    password: &SecretString,
    confirmation: &SecretString,
) -> Result<(), ValidationError> {
    let value = password.expose_secret();

    if value != confirmation.expose_secret() {
        return Err(ValidationError::PasswordMismatch);
    }

    if field_len(password) < RESET_MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: RESET_MIN_PASSWORD_LENGTH,
        });
    }

    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(ValidationError::PasswordTooWeak);
    }

    Ok(())
}

fn field_len(password: &SecretString) -> usize {
    password.expose_secret().encode_utf16().count()
}
