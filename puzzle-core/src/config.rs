use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SetupError};
use crate::ids::TileId;

pub const DEFAULT_TILE_COUNT: usize = 16;
pub const MAX_TILE_COUNT: usize = 1024;

/// Placeholder in [`PuzzleConfig::image_pattern`] replaced by the tile number.
pub const TILE_NUMBER_PLACEHOLDER: &str = "{n}";

/// Puzzle settings. Every field has a default, so a config file only needs
/// the keys it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub tile_count: usize,
    pub image_pattern: String,
    // DOM container ids used by the browser front end
    pub board_container: String,
    pub tray_container: String,
    pub solved_message: String,
    pub log_level: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            image_pattern: "img/pieza{n}.png".to_string(),
            board_container: "contenedor-rompecabezas".to_string(),
            tray_container: "contenedor-piezas".to_string(),
            solved_message: "¡Felicidades! Has completado el rompecabezas.".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PuzzleConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        grid_side(config.tile_count)?;
        Ok(config)
    }

    pub fn image_ref(&self, tile: TileId) -> String {
        self.image_pattern
            .replace(TILE_NUMBER_PLACEHOLDER, &tile.number().to_string())
    }

    /// Unknown level names fall back to `info`.
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Side length of the square grid holding `tile_count` tiles.
pub fn grid_side(tile_count: usize) -> Result<usize, SetupError> {
    let side = tile_count.isqrt();
    if tile_count == 0 || tile_count > MAX_TILE_COUNT || side * side != tile_count {
        return Err(SetupError::InvalidTileCount {
            count: tile_count,
            max: MAX_TILE_COUNT,
        });
    }
    Ok(side)
}
