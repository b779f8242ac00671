//! # oklch-worker
//!
//! Thread pool and scheduler for chart repaints.
//!
//! Dragging a slider changes the color on every pointer move, far faster
//! than charts can be painted. The scheduler bounds that work:
//!
//! - at most one job per task key is in flight
//! - calls made while a key is busy collapse into one pending call, the
//!   latest
//! - a finished job frees its workers for its own pending call first, then
//!   for any other waiting key
//!
//! # Architecture
//!
//! ```text
//!  coordinator thread                       worker threads
//! +-------------------+   WorkerMsg::Task   +------------+
//! |   WorkScheduler   | ------------------> |  handler   |  x N
//! |  busy / pending   | <------------------ |  (paint)   |
//! +-------------------+  WorkerEvent::Done  +------------+
//!          |
//!          v
//!   WorkSink::on_result / on_final  (CanvasAssembler)
//! ```
//!
//! The coordinator owns all scheduling state; workers only see payloads.
//!
//! # Example
//!
//! ```rust
//! use oklch_core::{Axis, PickerId};
//! use oklch_paint::BorderColors;
//! use oklch_worker::{chart_scheduler, ChartJob};
//! use std::sync::mpsc::channel;
//!
//! let mut scheduler = chart_scheduler(2).unwrap();
//! let job = ChartJob {
//!     axis: Axis::L,
//!     value: 0.7,
//!     width: 64,
//!     height: 32,
//!     show_p3: true,
//!     show_rec2020: false,
//!     display_p3: false,
//!     borders: BorderColors::default(),
//! };
//! let (tx, rx) = channel();
//! scheduler.start_chart(&PickerId::random(), job, 1, move |canvas| {
//!     let _ = tx.send(canvas);
//! });
//! scheduler.wait_idle().unwrap();
//! assert_eq!(rx.recv().unwrap().width(), 64);
//! ```
//!
//! # Dependencies
//!
//! - [`oklch-paint`] - the chart painter run on workers
//! - [`oklch-core`] - axes and picker ids
//!
//! # Used By
//!
//! - `oklch-cli` - `chart` subcommand

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod chart;
mod error;
mod messages;
mod pool;
mod scheduler;

pub use chart::{
    chart_scheduler, chart_task_key, partition, CanvasAssembler, ChartJob, ChartScheduler, PaintOutcome,
};
pub use error::{WorkerError, WorkerResult};
pub use messages::{WorkerEvent, WorkerMsg};
pub use pool::{Handler, WorkerPool};
pub use scheduler::{StartOutcome, WorkScheduler, WorkSink};
