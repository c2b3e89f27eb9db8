//! Input validation that runs before any request is issued.

use crate::error::{CoreError, Result};

/// Minimum password length the backend enforces for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate email address format.
///
/// This performs basic RFC 5322 validation:
/// - Must contain exactly one `@`
/// - Must have non-empty local and domain parts
/// - Domain must contain a dot
/// - Length must be between 3 and 255 characters
///
/// # Examples
///
/// ```
/// use conference_alert_core::validation::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(is_valid_email("user+tag@subdomain.example.com"));
/// assert!(!is_valid_email("invalid"));
/// assert!(!is_valid_email("@example.com"));
/// assert!(!is_valid_email("user@"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let valid_local = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_');
    let valid_domain = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-');

    local.chars().all(valid_local) && domain.chars().all(valid_domain)
}

/// Account sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; must equal `password`.
    pub password_confirm: String,
    /// Display name.
    pub name: String,
}

impl Registration {
    /// Collect a sign-up form.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
            name: name.into(),
        }
    }

    /// Check the form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(self.email.trim()) {
            return Err(CoreError::validation("email", "Enter a valid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if self.password != self.password_confirm {
            return Err(CoreError::validation("passwordConfirm", "Passwords do not match"));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name", "Name is required"));
        }
        Ok(())
    }
}

/// Check a sign-in form.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if either field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(CoreError::validation("identity", "Email is required"));
    }
    if password.is_empty() {
        return Err(CoreError::validation("password", "Password is required"));
    }
    Ok(())
}
