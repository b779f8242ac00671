//! Convert command
//!
//! Prints a color in the configured output notation, a chosen one or all
//! of them.

use crate::ConvertArgs;
use anyhow::Result;
use oklch_color::{format_all, format_output};
use oklch_store::PickerConfig;

pub fn run(args: ConvertArgs, config: &PickerConfig) -> Result<()> {
    let value = super::parse_value(&args.code)?;

    if args.all {
        let all = format_all(&value);
        let width = all
            .iter()
            .map(|(format, _)| format.id().len())
            .max()
            .unwrap_or(0);
        for (format, text) in &all {
            println!("{:<width$}  {}", format.id(), text);
        }
    } else {
        let format = args.format.unwrap_or(config.output_format);
        println!("{}", format_output(&value, format));
    }

    Ok(())
}
