//! Account credential rules.

use crate::ValidationError;

/// Minimum length for a locally registered password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Normalize and validate an email address.
///
/// Accepts `local@domain.tld` shapes only: exactly one `@`, non-empty local
/// part, a dot inside the domain and no whitespace. Returns the trimmed input.
pub fn parse_email(input: &str) -> Result<String, ValidationError> {
    let email = input.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_owned())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Admin flag granted to a user created through the identity provider.
///
/// Matches emails whose local part is exactly one ASCII letter followed by two
/// ASCII alphanumerics (`^[A-Za-z][A-Za-z0-9]{2}@`). This is a naming
/// convention, not an access control mechanism.
pub fn is_admin_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    let mut chars = local.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), Some(c), None) => {
            a.is_ascii_alphabetic() && b.is_ascii_alphanumeric() && c.is_ascii_alphanumeric()
        }
        _ => false,
    }
}
