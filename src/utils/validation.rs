use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref FIELD_PATH: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
    static ref SECRET: Regex = Regex::new(r"^[A-Za-z0-9_\-.!@#$%^&*+=]+$").unwrap();
}

// Names end up inside statement text (DEFINE TABLE/INDEX/USER take no parameters)
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if !IDENTIFIER.is_match(name) {
        let mut error = ValidationError::new("invalid_identifier");
        error.message = Some(Cow::from(
            "Names may only contain letters, digits and underscores",
        ));
        return Err(error);
    }

    Ok(())
}

pub fn validate_field_path(path: &str) -> Result<(), ValidationError> {
    if !FIELD_PATH.is_match(path) {
        let mut error = ValidationError::new("invalid_field_path");
        error.message = Some(Cow::from(
            "Field paths must be dot separated identifiers",
        ));
        return Err(error);
    }

    Ok(())
}

pub fn validate_secret(secret: &str) -> Result<(), ValidationError> {
    if !SECRET.is_match(secret) {
        let mut error = ValidationError::new("invalid_secret");
        error.message = Some(Cow::from(
            "Passwords may not contain quotes, backslashes or whitespace",
        ));
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(validate_identifier("usuarios").is_ok());
        assert!(validate_identifier("idx_email_unico").is_ok());
        assert!(validate_identifier("_private").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("9lives").is_err());
        assert!(validate_identifier("users; REMOVE TABLE users").is_err());
    }

    #[test]
    fn field_paths() {
        assert!(validate_field_path("email").is_ok());
        assert!(validate_field_path("address.city").is_ok());

        assert!(validate_field_path("address.").is_err());
        assert!(validate_field_path(".city").is_err());
        assert!(validate_field_path("address..city").is_err());
    }

    #[test]
    fn secrets_reject_statement_breaking_characters() {
        assert!(validate_secret("app_segura_123").is_ok());
        assert!(validate_secret("consulta123").is_ok());

        assert!(validate_secret("it's").is_err());
        assert!(validate_secret("back\\slash").is_err());
        assert!(validate_secret("two words").is_err());
        assert!(validate_secret("").is_err());
    }
}
