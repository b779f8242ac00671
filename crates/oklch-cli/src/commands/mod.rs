//! CLI command implementations

pub mod chart;
pub mod convert;
pub mod model;
pub mod parse;
pub mod range;

use crate::DisplayArgs;
use anyhow::{bail, Context, Result};
use oklch_color::{code_to_lch_value, parse_css};
use oklch_core::LchValue;
use oklch_paint::{BorderColors, RgbaImage};
use oklch_store::PickerConfig;
use std::path::Path;
use tracing::debug;

/// Load the picker configuration, or the defaults without a file
pub fn load_config(path: Option<&Path>) -> Result<PickerConfig> {
    match path {
        Some(path) => {
            let config = PickerConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            debug!(path = %path.display(), ?config, "config loaded");
            Ok(config)
        }
        None => Ok(PickerConfig::default()),
    }
}

/// Parse a color code into a picker value, reporting why it failed
pub fn parse_value(code: &str) -> Result<LchValue> {
    match code_to_lch_value(code) {
        Some(value) => Ok(value),
        None => match parse_css(code) {
            Err(err) => bail!("Not a color: '{}' ({})", code, err),
            Ok(_) => bail!("Not a color: '{}'", code),
        },
    }
}

/// Show flags resolved against the configuration: `(show_p3, show_rec2020)`
pub fn show_flags(display: &DisplayArgs, config: &PickerConfig) -> (bool, bool) {
    (
        display.p3.unwrap_or(config.show_p3),
        display.rec2020.unwrap_or(config.show_rec2020),
    )
}

/// Boundary colors from the configuration
pub fn borders(config: &PickerConfig) -> BorderColors {
    BorderColors::from_css(&config.border_p3, &config.border_rec2020)
}

/// Save a canvas as PNG
pub fn save_png(path: &Path, image: &RgbaImage) -> Result<()> {
    image
        .write_png(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
