use crate::error::{Error, Result};

const MAX_EMAIL_LEN: usize = 254;

/// Trims and checks an email address, returning the trimmed value.
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(Error::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(Error::Validation(format!(
            "Email cannot exceed {MAX_EMAIL_LEN} characters"
        )));
    }
    if !email.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(Error::Validation("Email address is not valid".to_string()));
    }
    Ok(email.to_string())
}

pub fn validate_group_keys(group_keys: &[i64]) -> Result<()> {
    if group_keys.is_empty() {
        return Err(Error::Validation(
            "At least one group is required".to_string(),
        ));
    }
    Ok(())
}
