// src/config.rs
use crate::board::RuleOptions;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

// --- Constants ---
pub const DEFAULT_CONFIG_FILENAME: &str = "chess_console.json";
pub const DEFAULT_TILE_SIZE: u32 = 100; // pixels per square in windowed adapters

/// Presentation settings shared by the adapters, plus the rule toggle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub show_hints: bool,
    pub show_coordinates: bool,
    pub unicode_pieces: bool,
    pub strict_castling: bool,
    pub tile_size: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            show_hints: true,
            show_coordinates: true,
            unicode_pieces: false,
            strict_castling: false,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl ConsoleConfig {
    /// Reads a JSON config. A file that does not exist yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConsoleConfig::default()),
            Err(e) => return Err(ConfigError::Io(path.display().to_string(), e)),
        };
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions { strict_castling: self.strict_castling }
    }
}
