//=========================================================================
// Configuration
//=========================================================================
//
// Layer descriptors and window settings, loaded from TOML or taken from
// the built-in defaults.
//
// File layout:
// ```toml
// [window]
// title = "Aetheric Layers"
// width = 800
// height = 600
// background = 0x000000
//
// [[layers]]
// position = { x = 20, y = 20 }
// color = 0x0000ff
// width = 100
// height = 100
// ```
//
// Every section is optional. A file without `[[layers]]` keeps the
// default layers; a file with an empty `layers = []` shows none.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Size};

//=== Constants ===========================================================

/// Largest value representable as 0xRRGGBB.
const MAX_COLOR: u32 = 0x00ff_ffff;

//=== ConfigError =========================================================

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layer {index}: size must be positive and finite, got {width}x{height}")]
    InvalidLayerSize { index: usize, width: f32, height: f32 },

    #[error("layer {index}: position must be finite, got ({x}, {y})")]
    InvalidLayerPosition { index: usize, x: f32, y: f32 },

    #[error("layer {index}: color {color:#x} does not fit in 0xRRGGBB")]
    InvalidLayerColor { index: usize, color: u32 },

    #[error("window size must be positive and finite, got {width}x{height}")]
    InvalidWindowSize { width: f32, height: f32 },

    #[error("window background {0:#x} does not fit in 0xRRGGBB")]
    InvalidBackground(u32),
}

//=== Color ===============================================================

/// A 24-bit RGB tint stored as 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);

    /// Red, green and blue channels normalized to `0.0..=1.0`.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    fn is_valid(self) -> bool {
        self.0 <= MAX_COLOR
    }
}

//=== LayerDescriptor =====================================================

/// One configured layer: where it starts, how big it is, what tint it has.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayerDescriptor {
    pub position: Point,
    pub color: Color,
    pub width: f32,
    pub height: f32,
}

impl LayerDescriptor {
    pub const fn new(position: Point, color: Color, width: f32, height: f32) -> Self {
        Self { position, color, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !self.size().is_valid() {
            return Err(ConfigError::InvalidLayerSize {
                index,
                width: self.width,
                height: self.height,
            });
        }
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(ConfigError::InvalidLayerPosition {
                index,
                x: self.position.x,
                y: self.position.y,
            });
        }
        if !self.color.is_valid() {
            return Err(ConfigError::InvalidLayerColor { index, color: self.color.0 });
        }
        Ok(())
    }
}

/// The three layers the demo ships with.
pub fn default_layers() -> Vec<LayerDescriptor> {
    vec![
        LayerDescriptor::new(Point::new(20.0, 20.0), Color(0x0000ff), 100.0, 100.0),
        LayerDescriptor::new(Point::new(20.0, 160.0), Color(0xff00ff), 200.0, 150.0),
        LayerDescriptor::new(Point::new(260.0, 20.0), Color(0x00ff00), 250.0, 250.0),
    ]
}

//=== WindowConfig ========================================================

/// Window title, initial logical size and background tint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aetheric Layers".to_string(),
            width: 800.0,
            height: 600.0,
            background: Color::BLACK,
        }
    }
}

//=== Config ==============================================================

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub layers: Vec<LayerDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layers: default_layers(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        debug!(target: "config", "Parsed config with {} layers", config.layers.len());
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        info!(target: "config", "Loaded {} layers from {}", config.layers.len(), path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!(target: "config", "No config file given, using built-in layers");
                Ok(Self::default())
            }
        }
    }

    /// Checks window and layer values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window_size = Size::new(self.window.width, self.window.height);
        if !window_size.is_valid() {
            return Err(ConfigError::InvalidWindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }
        if !self.window.background.is_valid() {
            return Err(ConfigError::InvalidBackground(self.window.background.0));
        }
        for (index, layer) in self.layers.iter().enumerate() {
            layer.validate(index)?;
        }
        Ok(())
    }

    /// Renders the configuration back to the TOML layout accepted by
    /// [`Config::from_toml_str`].
    pub fn to_toml_string(&self) -> String {
        let mut out = String::new();
        out.push_str("[window]\n");
        let title = toml::Value::String(self.window.title.clone());
        out.push_str(&format!("title = {}\n", title));
        out.push_str(&format!("width = {}\n", self.window.width));
        out.push_str(&format!("height = {}\n", self.window.height));
        out.push_str(&format!("background = 0x{:06x}\n", self.window.background.0));
        for layer in &self.layers {
            out.push_str("\n[[layers]]\n");
            out.push_str(&format!(
                "position = {{ x = {}, y = {} }}\n",
                layer.position.x, layer.position.y
            ));
            out.push_str(&format!("color = 0x{:06x}\n", layer.color.0));
            out.push_str(&format!("width = {}\n", layer.width));
            out.push_str(&format!("height = {}\n", layer.height));
        }
        out
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_three_layers() {
        let config = Config::default();
        assert_eq!(config.layers.len(), 3);
        assert_eq!(config.layers[0].position, Point::new(20.0, 20.0));
        assert_eq!(config.layers[1].color, Color(0xff00ff));
        assert_eq!(config.layers[2].size(), Size::new(250.0, 250.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn color_channels() {
        assert_eq!(Color(0xff0000).to_rgb_f32(), [1.0, 0.0, 0.0]);
        assert_eq!(Color(0x00ff00).to_rgb_f32(), [0.0, 1.0, 0.0]);
        assert_eq!(Color(0x0000ff).to_rgb_f32(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_full_document() {
        let source = r#"
            [window]
            title = "Test"
            width = 1024
            height = 768
            background = 0x101010

            [[layers]]
            position = { x = 5, y = 6 }
            color = 0xabcdef
            width = 10
            height = 20
        "#;

        let config = Config::from_toml_str(source).unwrap();
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 1024.0);
        assert_eq!(config.window.background, Color(0x101010));
        assert_eq!(config.layers.len(), 1);
        assert_eq!(
            config.layers[0],
            LayerDescriptor::new(Point::new(5.0, 6.0), Color(0xabcdef), 10.0, 20.0)
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());

        let config = Config::from_toml_str("[window]\ntitle = \"Only title\"\n").unwrap();
        assert_eq!(config.window.title, "Only title");
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.layers.len(), 3);
    }

    #[test]
    fn empty_layer_list_is_kept() {
        let config = Config::from_toml_str("layers = []\n").unwrap();
        assert!(config.layers.is_empty());
    }

    #[test]
    fn rejects_non_positive_layer_size() {
        let source = r#"
            [[layers]]
            position = { x = 0, y = 0 }
            color = 0xffffff
            width = 0
            height = 20
        "#;

        match Config::from_toml_str(source) {
            Err(ConfigError::InvalidLayerSize { index, .. }) => assert_eq!(index, 0),
            other => panic!("Expected InvalidLayerSize, got {:?}", other),
        }
    }

    #[test]
    fn rejects_color_wider_than_24_bits() {
        let source = r#"
            [[layers]]
            position = { x = 0, y = 0 }
            color = 0x1000000
            width = 10
            height = 20
        "#;

        assert!(matches!(
            Config::from_toml_str(source),
            Err(ConfigError::InvalidLayerColor { index: 0, color: 0x1000000 })
        ));
    }

    #[test]
    fn rejects_invalid_window_size() {
        let source = "[window]\nwidth = -1\n";
        assert!(matches!(
            Config::from_toml_str(source),
            Err(ConfigError::InvalidWindowSize { .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("[[layers]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/layers.toml");
        match Config::load(path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn default_config_survives_toml_rendering() {
        let rendered = Config::default().to_toml_string();
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn rendered_title_is_toml_escaped() {
        let mut config = Config::default();
        config.window.title = "say \"hi\" \\ tab\t del\u{7f} nul\u{0}".to_string();

        let rendered = config.to_toml_string();
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.window.title, config.window.title);
    }
}
