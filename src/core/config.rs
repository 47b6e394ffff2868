//! Process configuration
//!
//! Settings come from the environment (after `.env` is loaded), optionally layered
//! over a YAML file named by `BOT_CONFIG_PATH`. Environment values win.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Optional YAML config file, ignored user list
//! - 1.0.0: Environment-only configuration

use serde::Deserialize;
use serenity::model::id::{RoleId, UserId};
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Semaphore;

use super::error::ConfigError;
use crate::commands::permission::Permission;
use crate::commands::pool::PoolConfig;

const DEFAULT_MAX_CONCURRENT: usize = 16;
const DEFAULT_MAX_PENDING: usize = 256;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
    pub staff_role_id: RoleId,
    pub owner_id: Option<UserId>,
    pub ignored_user_ids: Vec<UserId>,
    pub max_concurrent: usize,
    pub max_pending: usize,
    /// `None` disables the invocation deadline
    pub invoke_timeout: Option<Duration>,
    pub log_level: String,
}

/// Settings as they appear in the optional YAML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub discord_token: Option<String>,
    pub command_prefix: Option<String>,
    pub staff_role_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub ignored_user_ids: Vec<u64>,
    pub max_concurrent: Option<usize>,
    pub max_pending: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &str, contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match std::env::var("BOT_CONFIG_PATH") {
            Ok(path) => FileConfig::load(&path)?,
            Err(_) => FileConfig::default(),
        };
        Self::from_sources(|key| std::env::var(key).ok(), file)
    }

    /// Build configuration from a key lookup and file settings
    pub fn from_sources<F>(lookup: F, file: FileConfig) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = env("DISCORD_TOKEN")
            .or(file.discord_token)
            .ok_or(ConfigError::MissingSetting("DISCORD_TOKEN"))?;

        // The prefix is taken verbatim so that prefixes like "fs " keep their space.
        let command_prefix = lookup("COMMAND_PREFIX")
            .filter(|v| !v.is_empty())
            .or(file.command_prefix)
            .ok_or(ConfigError::MissingSetting("COMMAND_PREFIX"))?;
        if command_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        let staff_role_id = setting("STAFF_ROLE_ID", env("STAFF_ROLE_ID"), file.staff_role_id)?
            .map(RoleId)
            .ok_or(ConfigError::MissingSetting("STAFF_ROLE_ID"))?;

        let owner_id = setting("BOT_OWNER_ID", env("BOT_OWNER_ID"), file.owner_id)?.map(UserId);

        let ignored_user_ids = match env("IGNORED_USER_IDS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_value::<u64>("IGNORED_USER_IDS", s).map(UserId))
                .collect::<Result<Vec<_>, _>>()?,
            None => file.ignored_user_ids.into_iter().map(UserId).collect(),
        };

        let max_concurrent = setting(
            "DISPATCH_MAX_CONCURRENT",
            env("DISPATCH_MAX_CONCURRENT"),
            file.max_concurrent,
        )?
        .unwrap_or(DEFAULT_MAX_CONCURRENT);
        if max_concurrent == 0 || max_concurrent > Semaphore::MAX_PERMITS {
            return Err(ConfigError::InvalidSetting {
                key: "DISPATCH_MAX_CONCURRENT",
                value: max_concurrent.to_string(),
            });
        }

        let max_pending = setting(
            "DISPATCH_MAX_PENDING",
            env("DISPATCH_MAX_PENDING"),
            file.max_pending,
        )?
        .unwrap_or(DEFAULT_MAX_PENDING);
        if max_pending == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "DISPATCH_MAX_PENDING",
                value: "0".to_string(),
            });
        }

        let timeout_secs = setting(
            "DISPATCH_TIMEOUT_SECS",
            env("DISPATCH_TIMEOUT_SECS"),
            file.timeout_secs,
        )?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let invoke_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let log_level = env("LOG_LEVEL")
            .or(file.log_level)
            .unwrap_or_else(|| "info".to_string());

        Ok(Config {
            discord_token,
            command_prefix,
            staff_role_id,
            owner_id,
            ignored_user_ids,
            max_concurrent,
            max_pending,
            invoke_timeout,
            log_level,
        })
    }

    /// Requirement for staff commands: the staff role, or the bot owner if configured
    pub fn staff_permission(&self) -> Permission {
        match self.owner_id {
            Some(owner) => Permission::Any(vec![
                Permission::Role(self.staff_role_id),
                Permission::User(owner),
            ]),
            None => Permission::Role(self.staff_role_id),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_concurrent: self.max_concurrent,
            max_pending: self.max_pending,
            deadline: self.invoke_timeout,
        }
    }
}

fn setting<T: FromStr>(
    key: &'static str,
    env_value: Option<String>,
    file_value: Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env_value {
        Some(raw) => parse_value(key, &raw).map(Some),
        None => Ok(file_value),
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidSetting {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DISCORD_TOKEN", "token"),
            ("COMMAND_PREFIX", "!"),
            ("STAFF_ROLE_ID", "1234"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_sources(lookup(&required()), FileConfig::default()).unwrap();
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.staff_role_id, RoleId(1234));
        assert_eq!(config.owner_id, None);
        assert!(config.ignored_user_ids.is_empty());
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.max_pending, DEFAULT_MAX_PENDING);
        assert_eq!(config.invoke_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_prefix_is_error() {
        let pairs = [("DISCORD_TOKEN", "token"), ("STAFF_ROLE_ID", "1")];
        let err = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("COMMAND_PREFIX")));
    }

    #[test]
    fn test_blank_prefix_is_error() {
        let pairs = [
            ("DISCORD_TOKEN", "token"),
            ("COMMAND_PREFIX", "   "),
            ("STAFF_ROLE_ID", "1"),
        ];
        let err = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPrefix));
    }

    #[test]
    fn test_missing_staff_role_is_error() {
        let pairs = [("DISCORD_TOKEN", "token"), ("COMMAND_PREFIX", "!")];
        let err = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("STAFF_ROLE_ID")));
    }

    #[test]
    fn test_invalid_id_is_error() {
        let mut pairs = required();
        pairs.push(("BOT_OWNER_ID", "not-a-number"));
        let err = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { key: "BOT_OWNER_ID", .. }
        ));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let mut pairs = required();
        pairs.push(("DISPATCH_TIMEOUT_SECS", "0"));
        let config = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap();
        assert_eq!(config.invoke_timeout, None);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut pairs = required();
        pairs.push(("DISPATCH_MAX_CONCURRENT", "0"));
        assert!(Config::from_sources(lookup(&pairs), FileConfig::default()).is_err());
    }

    #[test]
    fn test_oversized_concurrency_rejected() {
        let too_many = (Semaphore::MAX_PERMITS + 1).to_string();
        let mut pairs: Vec<(&str, &str)> = required();
        pairs.push(("DISPATCH_MAX_CONCURRENT", &too_many));

        match Config::from_sources(lookup(&pairs), FileConfig::default()) {
            Err(ConfigError::InvalidSetting { key, value }) => {
                assert_eq!(key, "DISPATCH_MAX_CONCURRENT");
                assert_eq!(value, too_many);
            }
            other => panic!("expected InvalidSetting, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_ignored_users_parsed() {
        let mut pairs = required();
        pairs.push(("IGNORED_USER_IDS", "10, 20,,30"));
        let config = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap();
        assert_eq!(
            config.ignored_user_ids,
            vec![UserId(10), UserId(20), UserId(30)]
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let yaml = r#"
discord_token: file-token
command_prefix: "fs "
staff_role_id: 99
owner_id: 7
max_concurrent: 4
"#;
        let file = FileConfig::parse("test.yaml", yaml).unwrap();
        let config =
            Config::from_sources(lookup(&[("STAFF_ROLE_ID", "100")]), file).unwrap();

        assert_eq!(config.discord_token, "file-token");
        assert_eq!(config.command_prefix, "fs ");
        assert_eq!(config.staff_role_id, RoleId(100));
        assert_eq!(config.owner_id, Some(UserId(7)));
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn test_bad_yaml_is_error() {
        let err = FileConfig::parse("bad.yaml", "staff_role_id: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_staff_permission_includes_owner() {
        let mut pairs = required();
        pairs.push(("BOT_OWNER_ID", "55"));
        let config = Config::from_sources(lookup(&pairs), FileConfig::default()).unwrap();
        assert_eq!(
            config.staff_permission(),
            Permission::Any(vec![
                Permission::Role(RoleId(1234)),
                Permission::User(UserId(55)),
            ])
        );
    }
}
