//! The `config` crate contains everything loaded from disk: the display
//! configuration and the keyboard layout descriptor.

mod layout;
mod primitives;

use std::{fs::read_to_string, io, path::Path};

use serde::Deserialize;

pub use layout::{HalfLayout, KeyboardLayout, RowTemplate};
pub use primitives::{FiniteFloat, Ordinal, Vec3};

/// A color.
pub type Color = hex_color::HexColor;

/// The display configuration of the viewer.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// The preview configuration.
    pub preview: Preview,
    /// The colors used for displaying the keyboard.
    pub colors: Colors,
}

/// A configuration for previewing a keyboard.
#[derive(Clone, Deserialize)]
pub struct Preview {
    /// Whether to show the keys.
    pub show_keys: bool,
    /// The light positions.
    pub light_positions: Vec<Vec3<FiniteFloat>>,
}

/// A configuration of the colors used for displaying the keyboard.
#[derive(Copy, Clone, Deserialize)]
pub struct Colors {
    /// The color of the keycaps.
    pub keycap: Color,
    /// The color of the switches.
    pub switch: Color,
    /// The color of the background.
    pub background: Color,
}

impl Config {
    /// Loads a configuration from the TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file could not be opened or parsed.
    pub fn try_from_path(path: &Path) -> Result<Self, Error> {
        Ok(toml::from_str(&read_to_string(path)?)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        let toml_string = include_str!("default.toml");
        toml::from_str(toml_string).expect("default configuration should always be deserializable")
    }
}

/// The error type for errors regarding parsing configurations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open file.
    #[error("failed to open file")]
    FileOpen(#[from] io::Error),
    /// Failed to parse TOML.
    #[error("failed to parse TOML")]
    TomlParse(#[from] toml::de::Error),
    /// Float is not finite.
    #[error("float is not finite")]
    NonFiniteFloat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_deserializes() {
        let config = Config::default();

        assert!(config.preview.show_keys);
        assert!(!config.preview.light_positions.is_empty());
    }

    #[test]
    fn colors_parse_from_hex_strings() {
        let config: Config = toml::from_str(
            r##"
            [preview]
            show_keys = false
            light_positions = []

            [colors]
            keycap = "#102030"
            switch = "#405060"
            background = "#708090"
            "##,
        )
        .expect("configuration should deserialize");

        assert_eq!(config.colors.keycap.r, 0x10);
        assert_eq!(config.colors.background.b, 0x90);
    }
}
