//! Slot capacity configuration with documented defaults
//!
//! How many modification slots a chassis offers is a per-rarity setting.
//! The defaults below follow the rarity ladder one step at a time so a
//! higher-tier chassis is never the smaller host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rig::rarity::Rarity;

/// Per-rarity modification slot capacities
///
/// These values gate every install. Raising them loosens the whole
/// admission policy, so table overrides should go through `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Slots on a common (standard) chassis
    ///
    /// Two slots keeps entry-level chassis meaningfully constrained:
    /// a full loadout is reached after exactly two installs.
    pub common: u32,

    /// Slots on an uncommon (premium) chassis
    pub uncommon: u32,

    /// Slots on a rare (prototype) chassis
    pub rare: u32,

    /// Slots on a very rare (advanced) chassis
    pub very_rare: u32,

    /// Slots on a legendary chassis
    pub legendary: u32,

    /// Slots on an artifact chassis
    pub artifact: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            common: 2,
            uncommon: 3,
            rare: 4,
            very_rare: 5,
            legendary: 6,
            artifact: 7,
        }
    }
}

impl SlotConfig {
    /// Create a config with default capacities
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum slot count for a chassis of the given rarity
    pub fn max_slots(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::VeryRare => self.very_rare,
            Rarity::Legendary => self.legendary,
            Rarity::Artifact => self.artifact,
        }
    }

    /// Validate configuration for internal consistency
    ///
    /// Capacities may not shrink as rarity rises.
    pub fn validate(&self) -> Result<(), String> {
        let ladder = [
            self.common,
            self.uncommon,
            self.rare,
            self.very_rare,
            self.legendary,
            self.artifact,
        ];

        for pair in ladder.windows(2) {
            if pair[1] < pair[0] {
                return Err(format!(
                    "slot capacities must not decrease across rarity tiers ({} -> {})",
                    pair[0], pair[1]
                ));
            }
        }

        Ok(())
    }

    /// Load slot capacities from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse slot capacities from a TOML string
    ///
    /// Missing keys fall back to the defaults above.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigLoadError> {
        let config: SlotConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }
}

/// Error type for slot config loading
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacities() {
        let config = SlotConfig::default();

        assert_eq!(config.max_slots(Rarity::Common), 2);
        assert_eq!(config.max_slots(Rarity::Rare), 4);
        assert_eq!(config.max_slots(Rarity::Artifact), 7);
    }

    #[test]
    fn test_default_validates() {
        assert!(SlotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_decreasing_ladder_rejected() {
        let config = SlotConfig {
            rare: 1,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml_partial_uses_defaults() {
        let config = SlotConfig::parse_toml("common = 3\nuncommon = 3\n").unwrap();

        assert_eq!(config.common, 3);
        assert_eq!(config.uncommon, 3);
        // Untouched tiers keep their defaults
        assert_eq!(config.rare, 4);
        assert_eq!(config.artifact, 7);
    }

    #[test]
    fn test_parse_toml_invalid_ladder() {
        let result = SlotConfig::parse_toml("common = 5\n");

        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn test_parse_toml_bad_syntax() {
        let result = SlotConfig::parse_toml("common = = 5");

        assert!(matches!(result, Err(ConfigLoadError::Parse(_))));
    }
}
