//! Parse command
//!
//! Shows the picker value of a color code with its gamut, the color a
//! screen would show and the link fragment.

use crate::ParseArgs;
use anyhow::Result;
use oklch_color::{format_lch, get_visible_value, to_fragment};
use oklch_store::PickerConfig;

pub fn run(args: ParseArgs, config: &PickerConfig) -> Result<()> {
    let value = super::parse_value(&args.code)?;
    let visible = get_visible_value(&value, config.show_p3, config.show_rec2020);

    println!("{}", args.code);
    println!("  Value:    {}", format_lch(&value.to_color()));
    println!("  L C H A:  {} {} {} {}", value.l, value.c, value.h, value.a);
    println!("  Gamut:    {}", visible.space.label());
    if visible.is_exact() {
        println!("  Shown as: {}", visible.css());
    } else {
        println!("  Shown as: {} (mapped to sRGB)", visible.css());
    }
    println!("  Fragment: {}", to_fragment(&value));

    Ok(())
}
