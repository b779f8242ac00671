//! Point cloud of a gamut surface for the 3D model.
//!
//! The RGB cube of a gamut is sampled on a 0.01 grid, keeping only points on
//! its faces. Every chromatic point is placed in normalized OKLCH space:
//! `(l / L_MAX_COLOR, c / (2 * C_MAX), h / 360)`. Seven corner points pin
//! the bounding box so triangulations of different gamuts line up.

use oklch_color::{Color, ColorSpace};
use oklch_core::config::{C_MAX, L_MAX_COLOR};
use oklch_core::{Error, GamutSpace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Grid steps per channel.
const GRID: u32 = 100;

/// Corners appended after the surface points.
const BOUNDS: [[f64; 3]; 7] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// RGB gamut a model can be built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelGamut {
    /// sRGB cube
    #[default]
    Srgb,
    /// Display P3 cube
    P3,
    /// Rec2020 cube
    Rec2020,
}

impl ModelGamut {
    /// Color space whose channels span the cube.
    pub fn color_space(self) -> ColorSpace {
        match self {
            ModelGamut::Srgb => ColorSpace::Srgb,
            ModelGamut::P3 => ColorSpace::DisplayP3,
            ModelGamut::Rec2020 => ColorSpace::Rec2020,
        }
    }
}

impl TryFrom<GamutSpace> for ModelGamut {
    type Error = Error;

    fn try_from(space: GamutSpace) -> Result<Self, Error> {
        match space {
            GamutSpace::Srgb => Ok(ModelGamut::Srgb),
            GamutSpace::P3 => Ok(ModelGamut::P3),
            GamutSpace::Rec2020 => Ok(ModelGamut::Rec2020),
            GamutSpace::Out => Err(Error::unknown_name("model gamut", space.id())),
        }
    }
}

impl FromStr for ModelGamut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.parse::<GamutSpace>()?.try_into()
    }
}

impl fmt::Display for ModelGamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let space: GamutSpace = match self {
            ModelGamut::Srgb => GamutSpace::Srgb,
            ModelGamut::P3 => GamutSpace::P3,
            ModelGamut::Rec2020 => GamutSpace::Rec2020,
        };
        f.write_str(space.id())
    }
}

/// One vertex of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPoint {
    /// Normalized `(l, c, h)`
    pub position: [f64; 3],
    /// Vertex color, channels of the source gamut
    pub color: [f64; 3],
}

/// Returns `true` for points on a face of the unit cube.
#[inline]
fn on_gamut_edge(r: f64, g: f64, b: f64) -> bool {
    [r, g, b].iter().any(|&v| v == 0.0 || v > 0.99)
}

/// Surface points with the first channel fixed at `i / GRID`.
fn face_points(space: ColorSpace, i: u32) -> Vec<ModelPoint> {
    let r = f64::from(i) / f64::from(GRID);
    let mut points = Vec::new();
    for j in 0..=GRID {
        let g = f64::from(j) / f64::from(GRID);
        for k in 0..=GRID {
            let b = f64::from(k) / f64::from(GRID);
            if !on_gamut_edge(r, g, b) {
                continue;
            }
            let oklch = Color::new(space, [r, g, b], 1.0).to_oklch();
            // Achromatic points have no hue and would pile up at h = 0
            if oklch.h() == 0.0 {
                continue;
            }
            points.push(ModelPoint {
                position: [oklch.l() / L_MAX_COLOR, oklch.c() / (C_MAX * 2.0), oklch.h() / 360.0],
                color: [r, g, b],
            });
        }
    }
    points
}

/// Builds the point cloud of one gamut.
///
/// Uses rayon over the first channel when the `parallel` feature is enabled.
/// Output order is the same either way.
pub fn model_points(gamut: ModelGamut) -> Vec<ModelPoint> {
    let space = gamut.color_space();

    #[cfg(feature = "parallel")]
    let faces: Vec<Vec<ModelPoint>> = (0..=GRID).into_par_iter().map(|i| face_points(space, i)).collect();
    #[cfg(not(feature = "parallel"))]
    let faces: Vec<Vec<ModelPoint>> = (0..=GRID).map(|i| face_points(space, i)).collect();

    let mut points: Vec<ModelPoint> = faces.into_iter().flatten().collect();
    points.extend(BOUNDS.iter().map(|&corner| ModelPoint {
        position: corner,
        color: [corner[0]; 3],
    }));
    debug!(%gamut, points = points.len(), "model built");
    points
}
