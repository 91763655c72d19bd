//! Game configuration and round phases.
//!
//! `GameConfig` carries the handful of numbers the card engine needs from
//! the surrounding game: seat count, the power total that wins the game and
//! the default stealth limit printed on every card. It can be built in code
//! or loaded from JSON.
//!
//! ```
//! use drawcard_engine::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "player_count": 4 }"#).unwrap();
//! assert_eq!(config.player_count, 4);
//! assert_eq!(config.power_to_win, 15);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{CardError, Result};

/// Round phases as seen by a single player.
///
/// Effects never apply during `Setup`: cards report printed values until the
/// first real round starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Plot,
    Draw,
    Marshal,
    Challenge,
    Dominance,
    Standing,
    Taxation,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Plot => "plot",
            Phase::Draw => "draw",
            Phase::Marshal => "marshal",
            Phase::Challenge => "challenge",
            Phase::Dominance => "dominance",
            Phase::Standing => "standing",
            Phase::Taxation => "taxation",
        };
        f.write_str(name)
    }
}

fn default_player_count() -> usize {
    2
}

fn default_power_to_win() -> u32 {
    15
}

fn default_stealth_limit() -> u32 {
    1
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats at the table.
    #[serde(default = "default_player_count")]
    pub player_count: usize,

    /// Total power on a player's cards that wins the game.
    #[serde(default = "default_power_to_win")]
    pub power_to_win: u32,

    /// How many opposing characters a stealth card may bypass.
    #[serde(default = "default_stealth_limit")]
    pub default_stealth_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: default_player_count(),
            power_to_win: default_power_to_win(),
            default_stealth_limit: default_stealth_limit(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the winning power total (builder pattern).
    #[must_use]
    pub fn with_power_to_win(mut self, power: u32) -> Self {
        self.power_to_win = power;
        self
    }

    /// Set the default stealth limit (builder pattern).
    #[must_use]
    pub fn with_stealth_limit(mut self, limit: u32) -> Self {
        self.default_stealth_limit = limit;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| CardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for impossible values.
    pub fn validate(&self) -> Result<()> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(CardError::InvalidConfig(format!(
                "player_count must be between 1 and 255, got {}",
                self.player_count
            )));
        }
        if self.power_to_win == 0 {
            return Err(CardError::InvalidConfig(
                "power_to_win must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 2);
        assert_eq!(config.power_to_win, 15);
        assert_eq!(config.default_stealth_limit, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(3).with_power_to_win(20).with_stealth_limit(2);
        assert_eq!(config.player_count, 3);
        assert_eq!(config.power_to_win, 20);
        assert_eq!(config.default_stealth_limit, 2);
    }

    #[test]
    fn test_from_json_rejects_zero_players() {
        let err = GameConfig::from_json(r#"{ "player_count": 0 }"#).unwrap_err();
        assert!(matches!(err, CardError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&Phase::Marshal).unwrap();
        assert_eq!(json, "\"marshal\"");
        assert_eq!(Phase::default(), Phase::Setup);
    }
}
