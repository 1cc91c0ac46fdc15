//! Application policy read from env: which chats the generic handler serves and whether error replies
//! carry raw failure details.

use anyhow::{bail, Result};
use relay_bot::parse_flag;
use std::env;
use std::str::FromStr;

/// Which conversations the generic text handler answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenericScope {
    /// Private chats, plus any text that starts with a command marker.
    #[default]
    Private,
    /// Every conversation.
    All,
}

impl FromStr for GenericScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "private" => Ok(GenericScope::Private),
            "all" => Ok(GenericScope::All),
            other => bail!("GENERIC_SCOPE must be 'private' or 'all', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// GENERIC_SCOPE
    pub generic_scope: GenericScope,
    /// EXPOSE_ERROR_DETAILS; development aid only
    pub expose_error_details: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let generic_scope = match env::var("GENERIC_SCOPE") {
            Ok(v) => v.parse()?,
            Err(_) => GenericScope::default(),
        };
        let expose_error_details = env::var("EXPOSE_ERROR_DETAILS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Ok(Self {
            generic_scope,
            expose_error_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn scope_parses_known_values() {
        assert_eq!("private".parse::<GenericScope>().unwrap(), GenericScope::Private);
        assert_eq!(" ALL ".parse::<GenericScope>().unwrap(), GenericScope::All);
        assert!("groups".parse::<GenericScope>().is_err());
    }

    #[test]
    #[serial]
    fn from_env_defaults_and_overrides() {
        env::remove_var("GENERIC_SCOPE");
        env::remove_var("EXPOSE_ERROR_DETAILS");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.generic_scope, GenericScope::Private);
        assert!(!config.expose_error_details);

        env::set_var("GENERIC_SCOPE", "all");
        env::set_var("EXPOSE_ERROR_DETAILS", "true");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.generic_scope, GenericScope::All);
        assert!(config.expose_error_details);

        env::remove_var("GENERIC_SCOPE");
        env::remove_var("EXPOSE_ERROR_DETAILS");
    }
}
