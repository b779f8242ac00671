//! Model command
//!
//! Exports the 3D gamut model as CSV: normalized `l,c,h` position followed
//! by the vertex color.

use crate::ModelArgs;
use anyhow::{Context, Result};
use oklch_paint::{model_points, ModelPoint};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use tracing::info;

pub fn run(args: ModelArgs) -> Result<()> {
    let start = Instant::now();
    let points = model_points(args.gamut);
    info!(
        gamut = %args.gamut,
        points = points.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "model built"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            write_csv(BufWriter::new(file), &points)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            println!("{} points ({}) -> {}", points.len(), args.gamut, path.display());
        }
        None => write_csv(io::stdout().lock(), &points)?,
    }

    Ok(())
}

fn write_csv<W: Write>(mut out: W, points: &[ModelPoint]) -> io::Result<()> {
    writeln!(out, "l,c,h,r,g,b")?;
    for p in points {
        let [l, c, h] = p.position;
        let [r, g, b] = p.color;
        writeln!(out, "{l},{c},{h},{r},{g},{b}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let points = [ModelPoint {
            position: [0.5, 0.25, 0.75],
            color: [1.0, 0.0, 0.5],
        }];
        let mut out = Vec::new();
        write_csv(&mut out, &points).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "l,c,h,r,g,b\n0.5,0.25,0.75,1,0,0.5\n");
    }
}
