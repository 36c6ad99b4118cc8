use std::collections::HashMap;
use std::fs;
use std::path::Path;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::{config_error, invalid_credentials_error, unexpected_error, Error};

const DEFAULT_COOKIE_NAME: &str = "ridebook_auth";
const DEFAULT_EXPIRY_DAYS: i64 = 30;
const MAX_EXPIRY_DAYS: i64 = 3650;

/// Contents of the credentials file.
///
/// ```json
/// {
///   "credentials": {
///     "usernames": {
///       "admin": { "name": "Admin", "password": "$argon2id$...", "roles": ["admin"] }
///     }
///   },
///   "cookie": { "name": "ridebook_auth", "expiry_days": 30 }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub cookie: CookieConfig,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub usernames: HashMap<String, Account>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Argon2 hash in PHC string format.
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CookieConfig {
    pub name: String,
    pub expiry_days: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.into(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }
}

impl AuthConfig {
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path).map_err(config_error)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: AuthConfig = serde_json::from_str(raw).map_err(config_error)?;

        if !(1..=MAX_EXPIRY_DAYS).contains(&config.cookie.expiry_days) {
            return Err(config_error(format!(
                "cookie.expiry_days must be between 1 and {}",
                MAX_EXPIRY_DAYS
            )));
        }

        Ok(config)
    }

    /// Checks a username and password against the configured accounts.
    pub fn verify(&self, username: &str, password: &str) -> Result<User, Error> {
        let account = self
            .credentials
            .usernames
            .get(username)
            .ok_or_else(invalid_credentials_error)?;

        let hash = PasswordHash::new(&account.password).map_err(|err| {
            tracing::warn!("stored password for {} is not a valid hash: {}", username, err);
            invalid_credentials_error()
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .map_err(|_| invalid_credentials_error())?;

        Ok(User::new(username, &account.name, account.roles.clone()))
    }
}

/// Hashes a password for storage in the credentials file.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| unexpected_error())?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        let admin = hash_password("admin123").unwrap();
        let rider = hash_password("ride-on").unwrap();

        let raw = serde_json::json!({
            "credentials": {
                "usernames": {
                    "admin": { "name": "Admin", "password": admin, "roles": ["admin"] },
                    "asha": { "name": "Asha", "password": rider },
                    "broken": { "name": "Broken", "password": "plaintext" }
                }
            },
            "cookie": { "name": "ridebook_test", "key": "ignored", "expiry_days": 7 }
        });

        AuthConfig::from_json(&raw.to_string()).unwrap()
    }

    #[test]
    fn correct_password_yields_user_with_roles() {
        let config = config();

        let admin = config.verify("admin", "admin123").unwrap();
        assert_eq!(admin.display_name, "Admin");
        assert_eq!(admin.roles, vec!["admin".to_string()]);

        let rider = config.verify("asha", "ride-on").unwrap();
        assert_eq!(rider.display_name, "Asha");
        assert!(rider.roles.is_empty());
    }

    #[test]
    fn wrong_password_or_user_is_rejected() {
        let config = config();

        assert!(config
            .verify("admin", "wrong")
            .unwrap_err()
            .is_invalid_credentials_error());
        assert!(config
            .verify("nobody", "admin123")
            .unwrap_err()
            .is_invalid_credentials_error());
        assert!(config
            .verify("broken", "plaintext")
            .unwrap_err()
            .is_invalid_credentials_error());
    }

    #[test]
    fn cookie_settings_are_read() {
        let config = config();

        assert_eq!(config.cookie.name, "ridebook_test");
        assert_eq!(config.cookie.expiry_days, 7);
    }

    #[test]
    fn cookie_section_is_optional() {
        let config = AuthConfig::from_json(r#"{"credentials":{"usernames":{}}}"#).unwrap();

        assert_eq!(config.cookie.name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.cookie.expiry_days, DEFAULT_EXPIRY_DAYS);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        assert!(AuthConfig::from_json("credentials: {}").is_err());
        assert!(AuthConfig::from_json(
            r#"{"credentials":{"usernames":{}},"cookie":{"name":"x","expiry_days":0}}"#
        )
        .is_err());
    }

    #[test]
    fn oversized_expiry_is_a_config_error() {
        let raw = r#"{"credentials":{"usernames":{}},"cookie":{"name":"x","expiry_days":100000000}}"#;

        assert!(AuthConfig::from_json(raw).unwrap_err().is_config_error());

        let raw = r#"{"credentials":{"usernames":{}},"cookie":{"name":"x","expiry_days":3650}}"#;
        assert_eq!(AuthConfig::from_json(raw).unwrap().cookie.expiry_days, MAX_EXPIRY_DAYS);
    }

    #[test]
    fn hashes_use_fresh_salts() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();

        assert_ne!(first, second);
        assert!(PasswordHash::new(&first).is_ok());
    }
}
