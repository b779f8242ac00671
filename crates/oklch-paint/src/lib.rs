//! # oklch-paint
//!
//! Rasterizer for the picker's gamut visualizations.
//!
//! - **Charts** - 2D slices with one OKLCH axis fixed, painted per column
//!   slice so the work can be split across workers ([`paint`])
//! - **Slider strips** - 1D strips with gamut borders and slider stops
//!   ([`paint_range`])
//! - **Model** - gamut surface point cloud ([`model_points`])
//!
//! Every pixel is classified into the innermost shown gamut. Pixels outside
//! every shown gamut stay transparent, and the transitions between gamuts
//! are drawn as border lines.
//!
//! # Slices
//!
//! A [`PaintRequest`] covers canvas columns `from..to`. Painting a canvas in
//! slices and copying each [`PaintResult`] to its `from` column with
//! [`RgbaImage::blit_columns`] gives the same pixels as painting it whole,
//! apart from border lines that cross slice edges.
//!
//! ```rust
//! use oklch_core::Axis;
//! use oklch_paint::{paint, BorderColors, PaintRequest};
//!
//! let req = PaintRequest {
//!     axis: Axis::L,
//!     value: 0.7,
//!     from: 0,
//!     to: 32,
//!     width: 64,
//!     height: 32,
//!     show_p3: true,
//!     show_rec2020: false,
//!     display_p3: false,
//!     borders: BorderColors::default(),
//! };
//! let result = paint(&req).unwrap();
//! assert_eq!(result.image.width(), 32);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - builds model points with rayon
//!
//! # Dependencies
//!
//! - [`oklch-core`] - values, gamut spaces, constants
//! - [`oklch-color`] - conversion and gamut tests
//! - `png` - image output
//!
//! # Used By
//!
//! - `oklch-worker` - runs paint requests on its pool
//! - `oklch-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod chart;
mod error;
mod image;
mod model;
mod pixel;
mod range;
mod request;
mod separator;

pub use chart::{paint, paint_chart, ChartLayout, ChartMapping};
pub use error::{PaintError, Result};
pub use image::{CanvasEncoding, RgbaImage};
pub use model::{model_points, ModelGamut, ModelPoint};
pub use pixel::{encode_floor, encode_round, Pixel, PixelEncoder};
pub use range::{paint_range, slider_step, RangePaint, RangeRequest};
pub use request::{BorderColors, PaintRequest, PaintResult};
pub use separator::{border_pairs, separate, Separators};
