//! Engine configuration
//!
//! A small TOML file naming the search depth and the resources an engine
//! needs. Every file it names is read and validated when the game or the
//! engine is built, never during a search.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ply_core::{Game, SquareBonuses, START_FEN};

use crate::book::OpeningBook;
use crate::error::ConfigError;
use crate::NegamaxEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed search depth in plies
    pub search_depth: u8,
    /// Square-bonus table file; overrides the built-in table
    pub square_bonuses_file: Option<PathBuf>,
    /// Use the built-in square-bonus table when no file is given
    pub use_default_bonuses: bool,
    /// JSON opening book
    pub book_file: Option<PathBuf>,
    /// Starting position, the standard one if absent
    pub start_fen: Option<String>,
    /// Seed for book move choice
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            square_bonuses_file: None,
            use_default_bonuses: true,
            book_file: None,
            start_fen: None,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn bonuses(&self) -> Result<Option<SquareBonuses>, ConfigError> {
        match &self.square_bonuses_file {
            Some(path) => Ok(Some(SquareBonuses::load(path)?)),
            None if self.use_default_bonuses => Ok(Some(SquareBonuses::standard())),
            None => Ok(None),
        }
    }

    pub fn build_game(&self) -> Result<Game, ConfigError> {
        let fen = self.start_fen.as_deref().unwrap_or(START_FEN);
        Ok(Game::from_fen_with_bonuses(fen, self.bonuses()?)?)
    }

    pub fn build_engine(&self) -> Result<NegamaxEngine, ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::Depth(self.search_depth));
        }
        let engine = match self.rng_seed {
            Some(seed) => NegamaxEngine::with_seed(self.search_depth, seed),
            None => NegamaxEngine::new(self.search_depth),
        };
        match &self.book_file {
            Some(path) => Ok(engine.with_book(OpeningBook::load(path)?)),
            None => Ok(engine),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
