use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorPalette;
use crate::coords::GridLayout;
use crate::tile::TileKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Tile palette is empty")]
    EmptyPalette,
    #[error("Invalid grid size {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Invalid cell size {cell_width}x{cell_depth}")]
    InvalidCellSize { cell_width: f32, cell_depth: f32 },
    #[error("Invalid animation rate: {0}")]
    InvalidAnimationRate(f32),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to generate a map and drive its selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    /// Tile kinds drawn uniformly at random; list a kind twice to double its odds.
    pub palette: Vec<TileKind>,
    pub layout: GridLayout,
    pub colors: ColorPalette,
    /// 0 disables color animation.
    pub animation_rate: f32,
    pub seed: Option<u64>,
    pub regenerate_on_unreachable: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            palette: vec![
                TileKind::Grass,
                TileKind::Forest,
                TileKind::Desert,
                TileKind::Mountain,
                TileKind::Water,
            ],
            layout: GridLayout::default(),
            colors: ColorPalette::default(),
            animation_rate: 12.0,
            seed: None,
            regenerate_on_unreachable: false,
        }
    }
}

impl MapConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let GridLayout {
            cell_width,
            cell_depth,
        } = self.layout;
        if !(cell_width > 0.0 && cell_depth > 0.0) || !cell_width.is_finite() || !cell_depth.is_finite() {
            return Err(ConfigError::InvalidCellSize {
                cell_width,
                cell_depth,
            });
        }
        if !self.animation_rate.is_finite() || self.animation_rate < 0.0 {
            return Err(ConfigError::InvalidAnimationRate(self.animation_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_palette() {
        let c = MapConfig {
            palette: vec![],
            ..MapConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (width, height) in [(0, 4), (4, 0), (-2, 3)] {
            let c = MapConfig {
                width,
                height,
                ..MapConfig::default()
            };
            assert!(matches!(
                c.validate(),
                Err(ConfigError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_cell_size_and_rate() {
        let c = MapConfig {
            layout: GridLayout::new(0.0, 1.0),
            ..MapConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidCellSize { .. })));

        let c = MapConfig {
            animation_rate: -1.0,
            ..MapConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidAnimationRate(_))));
    }

    #[test]
    fn parses_partial_json() {
        let raw = json!({
            "width": 4,
            "height": 3,
            "palette": ["Grass", "Grass", "Water"],
            "animation_rate": 0.0,
            "seed": 7
        })
        .to_string();
        let c = MapConfig::from_json_str(&raw).unwrap();
        assert_eq!(c.width, 4);
        assert_eq!(c.palette.len(), 3);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.colors, ColorPalette::default());
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            MapConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            MapConfig::from_json_str(r#"{ "palette": [] }"#),
            Err(ConfigError::EmptyPalette)
        ));
    }
}
