//! Table configuration: blinds, starting stacks and seat names.

/// Chip amounts are whole units.
pub type Chips = u64;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("big blind must be greater than zero")]
    ZeroBigBlind,
    #[error("small blind must be greater than zero")]
    ZeroSmallBlind,
    #[error("small blind {small} must be below big blind {big}")]
    SmallBlindNotBelowBig { small: Chips, big: Chips },
    #[error("initial stack {stack} must be at least the big blind {big}")]
    StackBelowBigBlind { stack: Chips, big: Chips },
}

/// Settings for a heads-up game.
///
/// The defaults match a 100/200 game with 3000-chip stacks.
///
/// ```
/// use headsup_holdem::config::{ConfigError, GameConfig};
///
/// let cfg = GameConfig::default().with_blinds(50, 25);
/// assert!(cfg.validate().is_ok());
///
/// let bad = GameConfig::default().with_blinds(100, 100);
/// assert_eq!(bad.validate(), Err(ConfigError::SmallBlindNotBelowBig { small: 100, big: 100 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub big_blind: Chips,
    pub small_blind: Chips,
    pub initial_stack: Chips,
    pub player_names: [String; 2],
}

impl GameConfig {
    pub fn new(big_blind: Chips, small_blind: Chips, initial_stack: Chips) -> Self {
        Self { big_blind, small_blind, initial_stack, ..Self::default() }
    }

    pub fn with_blinds(mut self, big_blind: Chips, small_blind: Chips) -> Self {
        self.big_blind = big_blind;
        self.small_blind = small_blind;
        self
    }

    pub fn with_initial_stack(mut self, initial_stack: Chips) -> Self {
        self.initial_stack = initial_stack;
        self
    }

    pub fn with_player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    /// Check blind and stack constraints: `0 < small < big <= initial_stack`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind == 0 {
            return Err(ConfigError::ZeroSmallBlind);
        }
        if self.small_blind >= self.big_blind {
            return Err(ConfigError::SmallBlindNotBelowBig {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.initial_stack < self.big_blind {
            return Err(ConfigError::StackBelowBigBlind {
                stack: self.initial_stack,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            big_blind: 200,
            small_blind: 100,
            initial_stack: 3000,
            player_names: ["Player".to_string(), "Enemy".to_string()],
        }
    }
}
