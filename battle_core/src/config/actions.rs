//! Action catalog loading

use super::ConfigError;
use crate::item::Action;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for action configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    pub actions: Vec<Action>,
}

impl ActionsConfig {
    fn into_catalog(self) -> Result<HashMap<String, Action>, ConfigError> {
        let mut map = HashMap::new();
        for action in self.actions {
            let id = action.id.clone();
            if map.insert(id.clone(), action).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate action id '{}'",
                    id
                )));
            }
        }
        Ok(map)
    }
}

/// Load action configurations from a TOML file
pub fn load_action_configs(path: &Path) -> Result<HashMap<String, Action>, ConfigError> {
    let config: ActionsConfig = super::load_toml(path)?;
    config.into_catalog()
}

/// Load action configurations from a TOML string
pub fn parse_action_configs(content: &str) -> Result<HashMap<String, Action>, ConfigError> {
    let config: ActionsConfig = super::parse_toml(content)?;
    config.into_catalog()
}

/// Get the built-in action catalog
pub fn default_actions() -> HashMap<String, Action> {
    let toml = include_str!("../../config/actions.toml");
    parse_action_configs(toml).unwrap_or_else(|_| {
        let mut map = HashMap::new();
        map.insert("punch".to_string(), Action::punch());
        map
    })
}
