use crate::block::{AIR, BlockId, DEAD_BUSH, SNOW, TALL_GRASS, VINE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SEARCH_DISTANCE: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    pub search_distance: i32,
    pub replaceable_blocks: Vec<BlockId>,
    /// Per-provider toggles keyed by provider name. Missing names are enabled.
    pub providers: BTreeMap<String, bool>,
    pub debug: bool,
}

impl SearchConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_distance < 0 {
            return Err(ConfigError::Invalid(format!(
                "search-distance must be >= 0, got {}",
                self.search_distance
            )));
        }
        Ok(())
    }

    pub fn provider_enabled(&self, name: &str) -> bool {
        self.providers.get(name).copied().unwrap_or(true)
    }

    pub fn set_provider_enabled(&mut self, name: impl Into<String>, enabled: bool) {
        self.providers.insert(name.into(), enabled);
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_distance: DEFAULT_SEARCH_DISTANCE,
            replaceable_blocks: vec![AIR, TALL_GRASS, DEAD_BUSH, SNOW, VINE],
            providers: BTreeMap::new(),
            debug: false,
        }
    }
}
