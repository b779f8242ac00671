//! Chart repaints on the scheduler.
//!
//! A chart canvas is split into contiguous column ranges, one per allocated
//! worker. Each worker paints its range; [`CanvasAssembler`] copies every
//! part to its column offset as it arrives, so arrival order does not
//! matter.

use crate::error::WorkerResult;
use crate::scheduler::{StartOutcome, WorkScheduler, WorkSink};
use oklch_core::{Axis, PickerId};
use oklch_paint::{paint, BorderColors, CanvasEncoding, PaintRequest, PaintResult, RgbaImage};
use tracing::warn;

/// Output of one chart worker.
pub type PaintOutcome = oklch_paint::Result<PaintResult>;

/// Scheduler running chart paints.
pub type ChartScheduler = WorkScheduler<PaintRequest, PaintOutcome>;

/// Task key of one chart of one picker: `"<picker>-<axis>"`.
pub fn chart_task_key(picker: &PickerId, axis: Axis) -> String {
    format!("{picker}-{axis}")
}

/// Splits `0..width` into `parts` contiguous half-open ranges.
///
/// Every range is `floor(width / parts)` wide except the last, which ends
/// at `width`. Ranges can be empty when `parts > width`.
pub fn partition(width: u32, parts: usize) -> Vec<(u32, u32)> {
    let parts = parts.max(1);
    let n = u32::try_from(parts).unwrap_or(u32::MAX);
    let step = width / n;
    (0..n)
        .map(|i| {
            let from = step * i;
            let to = if i + 1 == n { width } else { step * (i + 1) };
            (from, to)
        })
        .collect()
}

/// A full chart canvas to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartJob {
    /// Fixed axis
    pub axis: Axis,
    /// Value of the fixed axis
    pub value: f64,
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Show the P3 gamut
    pub show_p3: bool,
    /// Show the Rec2020 gamut
    pub show_rec2020: bool,
    /// Display can show P3
    pub display_p3: bool,
    /// Boundary colors
    pub borders: BorderColors,
}

impl ChartJob {
    /// Request for columns `from..to`.
    pub fn request(&self, from: u32, to: u32) -> PaintRequest {
        PaintRequest {
            axis: self.axis,
            value: self.value,
            from,
            to,
            width: self.width,
            height: self.height,
            show_p3: self.show_p3,
            show_rec2020: self.show_rec2020,
            display_p3: self.display_p3,
            borders: self.borders,
        }
    }

    /// One request per non-empty range of [`partition`].
    pub fn requests(&self, parts: usize) -> Vec<PaintRequest> {
        partition(self.width, parts)
            .into_iter()
            .filter(|(from, to)| from < to)
            .map(|(from, to)| self.request(from, to))
            .collect()
    }

    /// Canvas encoding of the assembled image.
    #[inline]
    pub fn encoding(&self) -> CanvasEncoding {
        CanvasEncoding::for_display(self.display_p3)
    }
}

/// Sink that stitches painted parts into one canvas.
pub struct CanvasAssembler {
    job: ChartJob,
    canvas: RgbaImage,
    parts: usize,
    on_canvas: Box<dyn FnMut(RgbaImage)>,
}

impl CanvasAssembler {
    /// Creates an assembler that hands the finished canvas to `on_canvas`.
    pub fn new(job: ChartJob, on_canvas: impl FnMut(RgbaImage) + 'static) -> Self {
        let canvas = RgbaImage::new(job.width, job.height, job.encoding());
        Self {
            job,
            canvas,
            parts: 0,
            on_canvas: Box::new(on_canvas),
        }
    }

    /// Parts received so far.
    #[inline]
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Canvas as assembled so far.
    #[inline]
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Copies one part to its column offset.
    pub fn add(&mut self, result: &PaintResult) {
        match self.canvas.blit_columns(&result.image, result.from) {
            Ok(()) => self.parts += 1,
            Err(e) => warn!(axis = %self.job.axis, from = result.from, "part dropped: {e}"),
        }
    }
}

impl WorkSink<PaintRequest, PaintOutcome> for CanvasAssembler {
    fn prepare(&mut self, parts: usize) -> Vec<PaintRequest> {
        self.job.requests(parts)
    }

    fn on_result(&mut self, result: PaintOutcome) {
        match result {
            Ok(part) => self.add(&part),
            Err(e) => warn!(axis = %self.job.axis, "chart part failed: {e}"),
        }
    }

    fn on_final(&mut self) {
        let canvas = std::mem::replace(&mut self.canvas, RgbaImage::new(0, 0, self.job.encoding()));
        (self.on_canvas)(canvas);
    }
}

/// Creates a chart scheduler with `pool_size` workers.
pub fn chart_scheduler(pool_size: usize) -> WorkerResult<ChartScheduler> {
    WorkScheduler::new(pool_size, |req: PaintRequest| paint(&req))
}

impl ChartScheduler {
    /// Repaints one chart of one picker.
    ///
    /// `charts_to_change` is the number of charts being repainted at the
    /// same time; the pool is shared between them.
    pub fn start_chart(
        &mut self,
        picker: &PickerId,
        job: ChartJob,
        charts_to_change: usize,
        on_canvas: impl FnMut(RgbaImage) + 'static,
    ) -> StartOutcome {
        let key = chart_task_key(picker, job.axis);
        self.start_work(&key, charts_to_change, Box::new(CanvasAssembler::new(job, on_canvas)))
    }
}
