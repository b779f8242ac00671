//! Range command
//!
//! Paints one slider strip and prints the slider values where the gamut
//! changes.

use crate::RangeArgs;
use anyhow::{bail, Result};
use oklch_paint::{paint_range, RangeRequest};
use oklch_store::PickerConfig;
use tracing::info;

pub fn run(args: RangeArgs, config: &PickerConfig) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Strip size must be positive, got {}x{}", args.width, args.height);
    }
    let code = args.color.as_deref().unwrap_or(&config.default_color);
    let value = super::parse_value(code)?;
    let (show_p3, show_rec2020) = super::show_flags(&args.display, config);

    let request = RangeRequest {
        axis: args.axis,
        value,
        width: args.width,
        height: args.height,
        show_p3,
        show_rec2020,
        display_p3: args.display.display_p3,
        borders: super::borders(config),
    };
    let strip = paint_range(&request);
    info!(axis = %args.axis, stops = strip.stops.len(), "strip painted");

    if strip.stops.is_empty() {
        println!("{}: no gamut transitions", args.axis.label());
    } else {
        println!("{} stops:", args.axis.label());
        for stop in &strip.stops {
            println!("  {stop}");
        }
    }

    if let Some(path) = &args.output {
        super::save_png(path, &strip.image)?;
        println!("{}x{} -> {}", strip.image.width(), strip.image.height(), path.display());
    }

    Ok(())
}
