//! Store to scheduler to canvas.
//!
//! The store's chart listeners start scheduler jobs the way a picker UI
//! does; the scheduler is polled only when the test says so.

use oklch_core::{Axis, PartialValue};
use oklch_paint::{paint_chart, BorderColors, RgbaImage};
use oklch_store::{chart_listener_name, ListenerBundle, PickerConfig, StaticSupport, ValueStore};
use oklch_worker::{chart_scheduler, chart_task_key, CanvasAssembler, ChartJob, ChartScheduler, WorkSink};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

type Canvases = Rc<RefCell<Vec<(Axis, f64, RgbaImage)>>>;

fn job(axis: Axis, value: f64) -> ChartJob {
    ChartJob {
        axis,
        value,
        width: 48,
        height: 24,
        show_p3: false,
        show_rec2020: false,
        display_p3: false,
        borders: BorderColors::default(),
    }
}

/// Registers one chart listener per axis that paints through `scheduler`.
fn wire_charts(store: &mut ValueStore, scheduler: &Rc<RefCell<ChartScheduler>>, canvases: &Canvases) {
    let picker = store.id().clone();
    for axis in [Axis::L, Axis::C, Axis::H] {
        let scheduler = Rc::clone(scheduler);
        let canvases = Rc::clone(canvases);
        let picker = picker.clone();
        let bundle = ListenerBundle::new().on_axis(axis, move |value, charts| {
            let canvases = Rc::clone(&canvases);
            scheduler
                .borrow_mut()
                .start_chart(&picker, job(axis, value), charts, move |canvas| {
                    canvases.borrow_mut().push((axis, value, canvas));
                });
        });
        store.add_paint_callbacks(&chart_listener_name(axis), bundle);
    }
}

fn direct(axis: Axis, value: f64) -> RgbaImage {
    let job = job(axis, value);
    paint_chart(&job.request(0, job.width))
}

#[test]
fn test_initial_draw_paints_three_charts() {
    let scheduler = Rc::new(RefCell::new(chart_scheduler(3).unwrap()));
    let canvases = Canvases::default();
    let mut store = ValueStore::new("oklch(0.6 0.12 250)", StaticSupport::NONE).unwrap();
    wire_charts(&mut store, &scheduler, &canvases);

    assert!(store.initial_draw());
    scheduler.borrow_mut().wait_idle().unwrap();

    let done = canvases.borrow();
    let mut axes: Vec<Axis> = done.iter().map(|(axis, _, _)| *axis).collect();
    axes.sort_by_key(|a| a.as_str());
    assert_eq!(axes, [Axis::C, Axis::H, Axis::L]);
    for (axis, value, canvas) in done.iter() {
        assert_eq!(canvas, &direct(*axis, *value), "{axis} chart");
    }
}

/// A slider drag produces many updates; only the first and the last paint.
#[test]
fn test_drag_coalesces_to_latest() {
    let scheduler = Rc::new(RefCell::new(chart_scheduler(2).unwrap()));
    let canvases = Canvases::default();
    let mut store = ValueStore::new("oklch(0.6 0.12 250)", StaticSupport::NONE).unwrap();
    wire_charts(&mut store, &scheduler, &canvases);

    for step in 1..=20 {
        let h = 250.0 + f64::from(step) * 3.0;
        assert!(store.set_components(PartialValue::axis(Axis::H, h)).is_some());
    }
    let key = chart_task_key(store.id(), Axis::H);
    assert!(scheduler.borrow().has_pending(&key));
    scheduler.borrow_mut().wait_idle().unwrap();

    let done = canvases.borrow();
    let values: Vec<f64> = done.iter().map(|(_, value, _)| *value).collect();
    assert_eq!(values, [253.0, 310.0]);
    assert!(done.iter().all(|(axis, _, _)| *axis == Axis::H));
    assert_eq!(done[1].2, direct(Axis::H, 310.0));
}

/// Updates below the rounding threshold never reach the scheduler.
#[test]
fn test_insignificant_updates_skip_painting() {
    let scheduler = Rc::new(RefCell::new(chart_scheduler(1).unwrap()));
    let canvases = Canvases::default();
    let mut store = ValueStore::new("oklch(0.6 0.12 250)", StaticSupport::NONE).unwrap();
    wire_charts(&mut store, &scheduler, &canvases);

    assert!(store.set_components(PartialValue::axis(Axis::L, 0.600_001)).is_none());
    assert!(scheduler.borrow().is_idle());
    scheduler.borrow_mut().wait_idle().unwrap();
    assert!(canvases.borrow().is_empty());
}

/// Two pickers on one pool keep separate task keys.
#[test]
fn test_pickers_share_pool() {
    let scheduler = Rc::new(RefCell::new(chart_scheduler(2).unwrap()));
    let canvases = Canvases::default();
    let mut a = ValueStore::new("#ff6b00", StaticSupport::NONE).unwrap();
    let mut b = ValueStore::new("#0af", StaticSupport::NONE).unwrap();
    wire_charts(&mut a, &scheduler, &canvases);
    wire_charts(&mut b, &scheduler, &canvases);
    assert_ne!(a.id(), b.id());

    a.set_components(PartialValue::axis(Axis::L, 0.5));
    b.set_components(PartialValue::axis(Axis::L, 0.4));
    scheduler.borrow_mut().wait_idle().unwrap();

    let mut values: Vec<f64> = canvases.borrow().iter().map(|(_, v, _)| *v).collect();
    values.sort_by(f64::total_cmp);
    assert_eq!(values, [0.4, 0.5]);
}

/// Chart parts can arrive in any order.
#[test]
fn test_reassembly_any_order() {
    let mut rng = StdRng::seed_from_u64(42);
    for axis in [Axis::L, Axis::C, Axis::H] {
        let value = match axis {
            Axis::L => 0.7,
            Axis::C => 0.1,
            Axis::H => 140.0,
        };
        let chart = job(axis, value);
        let expected = direct(axis, value);
        let mut parts: Vec<_> = chart
            .requests(5)
            .iter()
            .map(|req| oklch_paint::paint(req).unwrap())
            .collect();
        for _ in 0..6 {
            parts.shuffle(&mut rng);
            let mut assembler = CanvasAssembler::new(chart, |_| {});
            for part in &parts {
                assembler.on_result(Ok(part.clone()));
            }
            assert_eq!(assembler.canvas(), &expected, "{axis} chart");
        }
    }
}

#[test]
fn test_config_file_drives_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("picker.ron");
    std::fs::write(
        &path,
        r##"(default_color: "#6b8e23", output_format: "hex", show_rec2020: true, workers: 2)"##,
    )
    .unwrap();

    let config = PickerConfig::from_file(&path).unwrap();
    assert_eq!(config.worker_count(), 2);
    let store = ValueStore::from_config(&config, StaticSupport::new(true, false)).unwrap();
    assert_eq!(store.formatted_output(), "#6b8e23");
    assert!(store.show_rec2020());
    assert!(store.support().p3);
}
