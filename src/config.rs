use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{config_error, Error};

pub const DATA_DIR_VAR: &str = "RIDEBOOK_DATA_DIR";
pub const AUTH_CONFIG_VAR: &str = "RIDEBOOK_AUTH_CONFIG";
pub const ADDR_VAR: &str = "RIDEBOOK_ADDR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_AUTH_CONFIG: &str = "auth/auth_config.json";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub auth_config: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    /// Reads settings from the environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let auth_config = lookup(AUTH_CONFIG_VAR).unwrap_or_else(|| DEFAULT_AUTH_CONFIG.into());
        let addr = lookup(ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(config_error)?;

        Ok(Self {
            data_dir: data_dir.into(),
            auth_config: auth_config.into(),
            addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.auth_config, PathBuf::from("auth/auth_config.json"));
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_VAR, "/var/lib/ridebook"),
            (AUTH_CONFIG_VAR, "/etc/ridebook/auth.json"),
            (ADDR_VAR, "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/ridebook"));
        assert_eq!(config.auth_config, PathBuf::from("/etc/ridebook/auth.json"));
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn bad_address_is_rejected() {
        let result = Config::from_lookup(|key| (key == ADDR_VAR).then(|| "nowhere".to_string()));

        assert!(result.is_err());
    }
}
