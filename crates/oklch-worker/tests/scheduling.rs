//! Scheduler behavior across keys and reassembly order.

use oklch_core::{Axis, PickerId};
use oklch_paint::{paint, BorderColors, RgbaImage};
use oklch_worker::{chart_task_key, CanvasAssembler, ChartJob, StartOutcome, WorkScheduler, WorkSink};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counts jobs that reached `on_final`, per label.
#[derive(Default, Clone)]
struct Finals(Rc<RefCell<Vec<&'static str>>>);

struct Counting {
    label: &'static str,
    finals: Finals,
}

impl WorkSink<u64, u64> for Counting {
    fn prepare(&mut self, parts: usize) -> Vec<u64> {
        vec![20; parts]
    }

    fn on_result(&mut self, _result: u64) {}

    fn on_final(&mut self) {
        self.finals.0.borrow_mut().push(self.label);
    }
}

fn sink(label: &'static str, finals: &Finals) -> Box<dyn WorkSink<u64, u64>> {
    Box::new(Counting {
        label,
        finals: finals.clone(),
    })
}

/// Like [`Counting`], with one sleep per worker given up front.
struct Timed {
    label: &'static str,
    millis: Vec<u64>,
    finals: Finals,
}

impl WorkSink<u64, u64> for Timed {
    fn prepare(&mut self, parts: usize) -> Vec<u64> {
        self.millis.iter().copied().cycle().take(parts).collect()
    }

    fn on_result(&mut self, _result: u64) {}

    fn on_final(&mut self) {
        self.finals.0.borrow_mut().push(self.label);
    }
}

fn timed(label: &'static str, millis: &[u64], finals: &Finals) -> Box<dyn WorkSink<u64, u64>> {
    Box::new(Timed {
        label,
        millis: millis.to_vec(),
        finals: finals.clone(),
    })
}

fn sleepy_scheduler(size: usize, calls: Arc<AtomicUsize>) -> WorkScheduler<u64, u64> {
    WorkScheduler::new(size, move |ms: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(ms));
        ms
    })
    .unwrap()
}

#[test]
fn rapid_calls_run_at_most_twice() {
    let finals = Finals::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut sched = sleepy_scheduler(4, Arc::clone(&calls));

    let outcomes: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|label| sched.start_work("k", 2, sink(label, &finals)))
        .collect();
    assert!(matches!(outcomes[0], StartOutcome::Started(_)));
    assert_eq!(outcomes[1..], [StartOutcome::Coalesced, StartOutcome::Coalesced]);

    sched.wait_idle().unwrap();
    assert_eq!(*finals.0.borrow(), ["first", "third"]);
    assert!(sched.is_idle());
    assert_eq!(sched.available(), 4);
}

#[test]
fn fresh_start_drops_older_waiting_call() {
    let finals = Finals::default();
    let mut sched = sleepy_scheduler(4, Arc::new(AtomicUsize::new(0)));

    assert_eq!(sched.start_work("a", 2, timed("a", &[20, 400], &finals)), StartOutcome::Started(2));
    assert_eq!(sched.start_work("b", 2, timed("b", &[400], &finals)), StartOutcome::Started(2));
    assert_eq!(sched.start_work("d", 1, timed("d-old", &[20], &finals)), StartOutcome::Queued);

    // The short half of "a" frees one worker while "a" is still running
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while sched.available() == 0 && std::time::Instant::now() < deadline {
        sched.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(sched.available(), 1);
    assert!(sched.has_pending("d"));

    assert_eq!(sched.start_work("d", 1, timed("d-new", &[20], &finals)), StartOutcome::Started(1));
    assert!(!sched.has_pending("d"));

    sched.wait_idle().unwrap();
    let done = finals.0.borrow();
    assert!(done.contains(&"d-new"));
    assert!(!done.contains(&"d-old"), "older call ran after the newer one: {done:?}");
    assert_eq!(done.len(), 3);
}

#[test]
fn keys_share_the_pool() {
    let finals = Finals::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut sched = sleepy_scheduler(6, Arc::clone(&calls));

    // Three charts at once split the pool
    for label in ["l", "c", "h"] {
        sched.start_work(label, 3, sink(label, &finals));
    }
    sched.wait_idle().unwrap();

    let mut done = finals.0.borrow().clone();
    done.sort_unstable();
    assert_eq!(done, ["c", "h", "l"]);
    assert_eq!(sched.available(), 6);
    assert!(calls.load(Ordering::SeqCst) >= 3);
}

#[test]
fn poll_is_non_blocking() {
    let finals = Finals::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut sched = sleepy_scheduler(1, calls);
    sched.start_work("slow", 1, sink("slow", &finals));
    // Still sleeping
    assert_eq!(sched.poll(), 0);
    assert!(sched.is_busy("slow"));
    sched.wait_idle().unwrap();
    assert!(!sched.is_busy("slow"));
}

#[test]
fn pickers_do_not_coalesce() {
    let a = chart_task_key(&PickerId::new("aaaaaaa"), Axis::L);
    let b = chart_task_key(&PickerId::new("bbbbbbb"), Axis::L);
    assert_ne!(a, b);

    let finals = Finals::default();
    let mut sched = sleepy_scheduler(2, Arc::new(AtomicUsize::new(0)));
    assert!(matches!(sched.start_work(&a, 2, sink("a", &finals)), StartOutcome::Started(_)));
    assert!(matches!(sched.start_work(&b, 2, sink("b", &finals)), StartOutcome::Started(_)));
}

#[test]
fn reassembly_ignores_arrival_order() {
    let job = ChartJob {
        axis: Axis::C,
        value: 0.12,
        width: 90,
        height: 40,
        show_p3: true,
        show_rec2020: true,
        display_p3: false,
        borders: BorderColors::default(),
    };
    let mut parts: Vec<_> = job
        .requests(7)
        .iter()
        .map(|req| paint(req).unwrap())
        .collect();

    let assemble = |parts: &[oklch_paint::PaintResult]| -> RgbaImage {
        let mut asm = CanvasAssembler::new(job, |_| {});
        for part in parts {
            asm.add(part);
        }
        assert_eq!(asm.parts(), parts.len());
        asm.canvas().clone()
    };

    let reference = assemble(&parts);
    let mut rng = StdRng::seed_from_u64(0x0c1c);
    for _ in 0..10 {
        parts.shuffle(&mut rng);
        assert_eq!(assemble(&parts), reference);
    }
}
