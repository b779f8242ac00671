//! Picker configuration.
//!
//! Stored as RON. Every field is optional in the file:
//!
//! ```text
//! (
//!     default_color: "oklch(0.673 0.18 163)",
//!     output_format: "hex",
//!     show_rec2020: true,
//!     border_p3: "#ff00ff",
//! )
//! ```

use crate::error::{StoreError, StoreResult};
use oklch_color::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::thread;

/// Color a new picker starts with.
pub const DEFAULT_COLOR: &str = "oklch(0.673 0.18 163)";

/// Boundary color when none is configured.
pub const DEFAULT_BORDER: &str = "#fff";

/// Settings of one picker session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Initial color, any CSS color
    pub default_color: String,
    /// Initial output notation, by id (`"hex/rgba"`, `"figmaP3"`, ...)
    #[serde(with = "format_id")]
    pub output_format: OutputFormat,
    /// Show the P3 gamut
    pub show_p3: bool,
    /// Show the Rec2020 gamut
    pub show_rec2020: bool,
    /// Show the 2D charts
    pub show_charts: bool,
    /// P3 boundary color, any CSS color
    pub border_p3: String,
    /// Rec2020 boundary color, any CSS color
    pub border_rec2020: String,
    /// Chart workers; 0 uses one per hardware thread
    pub workers: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_owned(),
            output_format: OutputFormat::default(),
            show_p3: true,
            show_rec2020: false,
            show_charts: true,
            border_p3: DEFAULT_BORDER.to_owned(),
            border_rec2020: DEFAULT_BORDER.to_owned(),
            workers: 0,
        }
    }
}

impl PickerConfig {
    /// Parses a RON document.
    pub fn from_ron(text: &str) -> StoreResult<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Loads a RON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::config_read(path, e))?;
        Self::from_ron(&text)
    }

    /// Serializes to pretty RON.
    pub fn to_ron(&self) -> StoreResult<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Worker count with 0 resolved to the hardware thread count.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            0 => thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        }
    }
}

/// Output formats as their string ids; some ids are not RON identifiers.
mod format_id {
    use oklch_color::OutputFormat;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(format: &OutputFormat, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(format.id())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<OutputFormat, D::Error> {
        let id = String::deserialize(d)?;
        id.parse().map_err(de::Error::custom)
    }
}
