//! Chart command
//!
//! Paints 2D gamut charts through the worker scheduler. The charts are
//! wired to a value store the way a picker UI wires them: one listener per
//! chart, started by the store's initial draw. A single chart goes to the
//! scheduler directly.

use crate::ChartArgs;
use anyhow::{bail, Result};
use oklch_core::{Axis, PartialValue, PickerId};
use oklch_paint::RgbaImage;
use oklch_store::{chart_listener_name, ListenerBundle, PickerConfig, StaticSupport, ValueStore};
use oklch_worker::{chart_scheduler, ChartJob, ChartScheduler};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

type Canvases = Rc<RefCell<Vec<(Axis, RgbaImage)>>>;

pub fn run(args: ChartArgs, config: &PickerConfig, threads: usize) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Chart size must be positive, got {}x{}", args.width, args.height);
    }

    let workers = match (args.workers, threads) {
        (0, 0) => config.worker_count(),
        (0, n) | (n, _) => n,
    };
    let scheduler = Rc::new(RefCell::new(chart_scheduler(workers)?));

    let mut store = ValueStore::from_config(config, StaticSupport::new(args.display.display_p3, false))?;
    if let Some(code) = &args.color {
        store.set_value(super::parse_value(code)?);
    }
    if let (Some(axis), Some(value)) = (args.axis, args.value) {
        store.set_components(PartialValue::axis(axis, value));
    }
    let (show_p3, show_rec2020) = super::show_flags(&args.display, config);
    store.set_show_p3(show_p3);
    store.set_show_rec2020(show_rec2020);

    let template = ChartJob {
        axis: Axis::L,
        value: 0.0,
        width: args.width,
        height: args.height,
        show_p3,
        show_rec2020,
        display_p3: store.support().p3,
        borders: super::borders(config),
    };

    let canvases = Canvases::default();
    let picker = store.id().clone();
    let start = Instant::now();
    match args.axis {
        Some(axis) => {
            let job = ChartJob {
                axis,
                value: store.value().get(axis),
                ..template
            };
            request_chart(&scheduler, &canvases, &picker, job, 1);
        }
        None => {
            for axis in [Axis::L, Axis::C, Axis::H] {
                let scheduler = Rc::clone(&scheduler);
                let canvases = Rc::clone(&canvases);
                let picker = picker.clone();
                let bundle = ListenerBundle::new().on_axis(axis, move |value, charts| {
                    let job = ChartJob {
                        axis,
                        value,
                        ..template
                    };
                    request_chart(&scheduler, &canvases, &picker, job, charts);
                });
                store.add_paint_callbacks(&chart_listener_name(axis), bundle);
            }
            store.initial_draw();
        }
    }
    scheduler.borrow_mut().wait_idle()?;
    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, workers, "charts painted");

    let value = store.value();
    for (axis, canvas) in canvases.borrow().iter() {
        let path = if args.axis.is_some() {
            args.output.clone()
        } else {
            output_for_axis(&args.output, *axis)
        };
        super::save_png(&path, canvas)?;
        println!(
            "{} = {}: {}x{} -> {}",
            axis.label(),
            value.get(*axis),
            canvas.width(),
            canvas.height(),
            path.display()
        );
    }
    Ok(())
}

fn request_chart(
    scheduler: &RefCell<ChartScheduler>,
    canvases: &Canvases,
    picker: &PickerId,
    job: ChartJob,
    charts: usize,
) {
    let canvases = Rc::clone(canvases);
    let axis = job.axis;
    let outcome = scheduler.borrow_mut().start_chart(picker, job, charts, move |canvas| {
        canvases.borrow_mut().push((axis, canvas));
    });
    debug!(%axis, value = job.value, ?outcome, "chart requested");
}

/// `charts.png` -> `charts-l.png`
fn output_for_axis(path: &Path, axis: Axis) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{axis}.{ext}"),
        None => format!("{stem}-{axis}.png"),
    };
    path.with_file_name(name)
}
