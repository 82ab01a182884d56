use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::piece::Motion};

/// Character that always quits and can never be bound to a rotation.
pub const QUIT_KEY: char = 'q';

/// A key press as seen by the engine, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    Left,
    Right,
    Down,
    Char(char),
}

/// Per-game settings chosen before the first piece spawns.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// configuration file only needs to name what it changes.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, InputKey, Motion};
///
/// let config = GameConfig::default();
/// config.validate().unwrap();
/// assert_eq!(config.command_for(InputKey::Char('a')), Some(Motion::RotateLeft));
/// assert_eq!(config.command_for(InputKey::Char('x')), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start_level: u32,
    pub left_rotation_key: char,
    pub right_rotation_key: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: 0,
            left_rotation_key: 'a',
            right_rotation_key: 's',
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in [self.left_rotation_key, self.right_rotation_key] {
            if key.is_control() || key.is_whitespace() {
                return Err(ConfigError::UnprintableRotationKey(key));
            }
            if key == QUIT_KEY {
                return Err(ConfigError::ReservedRotationKey(key));
            }
        }
        if self.left_rotation_key == self.right_rotation_key {
            return Err(ConfigError::IdenticalRotationKeys(self.left_rotation_key));
        }
        Ok(())
    }

    /// Maps a key to the motion it requests, if any.
    #[must_use]
    pub fn command_for(&self, key: InputKey) -> Option<Motion> {
        match key {
            InputKey::Left => Some(Motion::Left),
            InputKey::Right => Some(Motion::Right),
            InputKey::Down => Some(Motion::Down),
            InputKey::Char(c) if c == self.left_rotation_key => Some(Motion::RotateLeft),
            InputKey::Char(c) if c == self.right_rotation_key => Some(Motion::RotateRight),
            InputKey::Char(_) => None,
        }
    }
}
