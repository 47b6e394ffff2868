//! Command registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Alias table with duplicate detection, owned prefix
//! - 1.0.0: Initial implementation for handler dispatch

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::handler::Command;
use super::parser::split_prefix;
use crate::core::ConfigError;

/// Registry mapping command names and aliases to commands
///
/// Built once during startup with [`register`](Self::register) and then shared
/// behind an `Arc`; every read method takes `&self` and needs no locking.
/// Every canonical name is also registered as its own alias, so alias lookup
/// is the only resolution path.
///
/// # Example
///
/// ```ignore
/// let mut registry = Registry::new("!")?;
/// registry.register(Arc::new(PingCommand))?;
/// registry.register(Arc::new(HelpCommand))?;
///
/// if let Some(name) = registry.resolve_alias("PING") {
///     let command = registry.lookup(name);
/// }
/// ```
pub struct Registry {
    prefix: String,
    commands: HashMap<String, Arc<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl Registry {
    /// Create an empty registry for the given prefix
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(Self {
            prefix,
            commands: HashMap::new(),
            aliases: HashMap::new(),
        })
    }

    /// Register a command under its canonical name and every alias
    ///
    /// Fails without modifying the registry if any of the names is already
    /// claimed or is not a single non-empty word.
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<(), ConfigError> {
        let canonical = command.name().to_lowercase();

        let mut keys: Vec<String> = Vec::with_capacity(command.aliases().len() + 1);
        for alias in std::iter::once(command.name()).chain(command.aliases().iter().copied()) {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidAlias {
                    command: command.name().to_string(),
                    alias: alias.to_string(),
                });
            }
            let key = alias.to_lowercase();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        for key in &keys {
            if let Some(existing) = self.aliases.get(key) {
                return Err(ConfigError::DuplicateRegistration {
                    alias: key.clone(),
                    existing: existing.clone(),
                    incoming: canonical,
                });
            }
        }

        debug!("Registered command `{canonical}` with aliases {keys:?}");
        for key in keys {
            self.aliases.insert(key, canonical.clone());
        }
        self.commands.insert(canonical, command);
        Ok(())
    }

    /// Register several commands, stopping at the first failure
    pub fn register_all<I>(&mut self, commands: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Arc<dyn Command>>,
    {
        commands.into_iter().try_for_each(|c| self.register(c))
    }

    /// Resolve typed text to a canonical command name
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(&alias.to_lowercase()).map(String::as_str)
    }

    /// Get a command by canonical name
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `text` begins with the command prefix (case-insensitive)
    pub fn has_prefix(&self, text: &str) -> bool {
        self.strip_prefix(text).is_some()
    }

    /// Remove the command prefix, keeping the remainder's case
    pub fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        split_prefix(text, &self.prefix)
    }

    /// All commands, ordered by canonical name
    pub fn commands(&self) -> Vec<Arc<dyn Command>> {
        let mut commands: Vec<_> = self.commands.values().cloned().collect();
        commands.sort_by_key(|c| c.name().to_lowercase());
        commands
    }

    /// Commands grouped by category, each group ordered by canonical name
    pub fn categories(&self) -> BTreeMap<String, Vec<Arc<dyn Command>>> {
        let mut groups: BTreeMap<String, Vec<Arc<dyn Command>>> = BTreeMap::new();
        for command in self.commands() {
            groups
                .entry(command.category().to_string())
                .or_default()
                .push(command);
        }
        groups
    }

    /// Aliases that resolve to `name`, including the name itself, sorted
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        let name = name.to_lowercase();
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, canonical)| **canonical == name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Number of registered commands (not aliases)
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("prefix", &self.prefix)
            .field("aliases", &self.aliases)
            .finish()
    }
}
