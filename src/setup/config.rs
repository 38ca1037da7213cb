use std::{env, fmt};

use validator::Validate;

use crate::utils::validation::validate_identifier;

const DEFAULT_URL: &str = "ws://127.0.0.1:8000";
const DEFAULT_USER: &str = "root";
const DEFAULT_PASS: &str = "root";
const DEFAULT_NAMESPACE: &str = "aprendizaje";

/// Connection settings supplied by the execution environment.
///
/// Only *where* and *as whom* to connect is configurable; everything that
/// gets provisioned is fixed in `utils::seed`.
#[derive(Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "DATABASE_URL must not be empty"))]
    pub url: String,
    pub username: String,
    password: String,
    #[validate(custom(function = "validate_identifier"))]
    pub namespace: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: String::from(DEFAULT_URL),
            username: String::from(DEFAULT_USER),
            password: String::from(DEFAULT_PASS),
            namespace: String::from(DEFAULT_NAMESPACE),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, validator::ValidationErrors> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, validator::ValidationErrors>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let config = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or(defaults.url),
            username: lookup("DATABASE_USER").unwrap_or(defaults.username),
            password: lookup("DATABASE_PASS").unwrap_or(defaults.password),
            namespace: lookup("DATABASE_NAMESPACE").unwrap_or(defaults.namespace),
        };

        config.validate()?;

        Ok(config)
    }

    /// Root credentials, unless the environment left them blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }

        Some((self.username.as_str(), self.password.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn falls_back_to_local_defaults() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.url, "ws://127.0.0.1:8000");
        assert_eq!(config.namespace, "aprendizaje");
        assert_eq!(config.credentials(), Some(("root", "root")));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mem://"),
            ("DATABASE_USER", "admin"),
            ("DATABASE_PASS", "admin123"),
            ("DATABASE_NAMESPACE", "clase"),
        ]))
        .unwrap();

        assert_eq!(config.url, "mem://");
        assert_eq!(config.namespace, "clase");
        assert_eq!(config.credentials(), Some(("admin", "admin123")));
    }

    #[test]
    fn blank_credentials_skip_signin() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_USER", "")])).unwrap();

        assert_eq!(config.credentials(), None);
    }

    #[test]
    fn debug_output_hides_the_password() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[(
            "DATABASE_PASS",
            "s3cr3t_admin",
        )]))
        .unwrap();

        let printed = format!("{config:?}");

        assert!(!printed.contains("s3cr3t_admin"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("ws://127.0.0.1:8000"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "")])).is_err());
        assert!(
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_NAMESPACE", "my-ns")]))
                .is_err()
        );
    }
}
