//! Coalescing scheduler over a [`WorkerPool`].
//!
//! Work is started per task key. A key runs at most once at a time; calls
//! made while it runs collapse into a single pending call, the most recent
//! one. Calls that find no idle worker wait in the same slot. Whenever a job
//! finishes, its own pending call starts next, or any other waiting key if
//! it has none.
//!
//! The scheduler itself is single-threaded: results are only processed in
//! [`WorkScheduler::poll`] and [`WorkScheduler::wait_idle`], so a caller can
//! never observe a job finishing between two of its own calls.

use crate::error::{WorkerError, WorkerResult};
use crate::messages::WorkerEvent;
use crate::pool::{Handler, WorkerPool};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace};

/// Caller side of one job: splits the work, then receives the parts.
pub trait WorkSink<T, R> {
    /// Builds one payload per allocated worker.
    ///
    /// Returning fewer payloads than `parts` leaves the extra workers idle.
    fn prepare(&mut self, parts: usize) -> Vec<T>;

    /// Receives one worker's output, in completion order.
    fn on_result(&mut self, result: R);

    /// Called once after the last part arrived.
    fn on_final(&mut self);
}

/// What [`WorkScheduler::start_work`] did with a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Dispatched to this many workers
    Started(usize),
    /// The key is running; the call replaced its pending slot
    Coalesced,
    /// No worker was idle; the call waits in the key's pending slot
    Queued,
}

struct Job<T, R> {
    parallelism: usize,
    sink: Box<dyn WorkSink<T, R>>,
}

struct Running<T, R> {
    sink: Box<dyn WorkSink<T, R>>,
    started: usize,
    finished: usize,
}

/// Single-slot debounced work queue per task key, over a shared pool.
pub struct WorkScheduler<T, R> {
    pool: WorkerPool<T, R>,
    available: Vec<usize>,
    busy: HashSet<String>,
    running: HashMap<String, Running<T, R>>,
    /// Pending calls in first-queued order; a key keeps its position when
    /// its call is replaced
    pending: Vec<(String, Job<T, R>)>,
}

impl<T, R> WorkScheduler<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Creates a scheduler with `pool_size` workers running `handler`.
    pub fn new<F>(pool_size: usize, handler: F) -> WorkerResult<Self>
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let handler: Handler<T, R> = Arc::new(handler);
        let pool = WorkerPool::spawn(pool_size, handler)?;
        Ok(Self {
            available: (0..pool.size()).collect(),
            pool,
            busy: HashSet::new(),
            running: HashMap::new(),
            pending: Vec::new(),
        })
    }

    /// Creates a scheduler with one worker per hardware thread.
    pub fn with_available_parallelism<F>(handler: F) -> WorkerResult<Self>
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let size = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::new(size, handler)
    }
}

impl<T, R> WorkScheduler<T, R> {
    /// Pool size.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    /// Idle workers.
    #[inline]
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Returns `true` while a job for `key` is in flight.
    #[inline]
    pub fn is_busy(&self, key: &str) -> bool {
        self.busy.contains(key)
    }

    /// Returns `true` if a call for `key` is waiting.
    pub fn has_pending(&self, key: &str) -> bool {
        self.pending.iter().any(|(k, _)| k == key)
    }

    /// Returns `true` when nothing runs and nothing waits.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.pending.is_empty()
    }

    /// Workers a new job gets: a fair share of the pool for `parallelism`
    /// concurrent jobs, plus one if that leaves spare idle workers, capped
    /// at the idle count.
    fn allocation(&self, parallelism: usize) -> usize {
        let total = self.pool.size();
        let idle = self.available.len();
        let mut started = total / parallelism;
        if started == 0 {
            if idle > 0 {
                started = 1;
            }
        } else if idle > parallelism * started {
            started += 1;
        }
        started.min(idle)
    }

    fn set_pending(&mut self, key: &str, job: Job<T, R>) {
        match self.pending.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = job,
            None => self.pending.push((key.to_owned(), job)),
        }
    }

    fn take_pending(&mut self, key: &str) -> Option<(String, Job<T, R>)> {
        let index = self.pending.iter().position(|(k, _)| k == key)?;
        Some(self.pending.remove(index))
    }

    /// Starts a job for `key` spread over up to `parallelism` concurrent
    /// jobs' worth of workers.
    ///
    /// A `parallelism` of 0 counts as 1.
    pub fn start_work(
        &mut self,
        key: &str,
        parallelism: usize,
        sink: Box<dyn WorkSink<T, R>>,
    ) -> StartOutcome {
        let parallelism = parallelism.max(1);
        if self.busy.contains(key) {
            trace!(key, "coalesced into pending");
            self.set_pending(key, Job { parallelism, sink });
            return StartOutcome::Coalesced;
        }

        let started = self.allocation(parallelism);
        if started == 0 {
            trace!(key, "no idle worker, queued");
            self.set_pending(key, Job { parallelism, sink });
            return StartOutcome::Queued;
        }

        // A call still waiting for this key is older than this one
        if self.take_pending(key).is_some() {
            trace!(key, "stale pending call dropped");
        }

        let mut sink = sink;
        let workers: Vec<usize> = self.available.drain(..started).collect();
        let payloads = sink.prepare(workers.len());

        let mut dispatched = 0;
        let mut unused = Vec::new();
        let mut payloads = payloads.into_iter();
        for worker in workers {
            let sent = match payloads.next() {
                Some(payload) => self.pool.send(worker, key, payload),
                None => false,
            };
            if sent {
                dispatched += 1;
            } else {
                unused.push(worker);
            }
        }
        self.available.extend(unused);

        if dispatched == 0 {
            sink.on_final();
            self.start_next(key);
            return StartOutcome::Started(0);
        }

        debug!(key, workers = dispatched, parallelism, "work started");
        self.busy.insert(key.to_owned());
        self.running.insert(
            key.to_owned(),
            Running {
                sink,
                started: dispatched,
                finished: 0,
            },
        );
        StartOutcome::Started(dispatched)
    }

    /// Starts the pending call of `key`, or of any other waiting key.
    ///
    /// Restarted calls take every idle worker.
    fn start_next(&mut self, key: &str) {
        let next = self.take_pending(key).or_else(|| {
            if self.pending.is_empty() {
                None
            } else {
                Some(self.pending.remove(0))
            }
        });
        if let Some((next_key, job)) = next {
            trace!(key = %next_key, requested = job.parallelism, "starting pending");
            self.start_work(&next_key, 1, job.sink);
        }
    }

    fn handle(&mut self, event: WorkerEvent<R>) {
        let WorkerEvent::Done { worker, key, result } = event;
        self.available.push(worker);

        let Some(run) = self.running.get_mut(&key) else {
            return;
        };
        run.sink.on_result(result);
        run.finished += 1;
        if run.finished < run.started {
            return;
        }

        if let Some(mut run) = self.running.remove(&key) {
            self.busy.remove(&key);
            debug!(key = %key, parts = run.finished, "work finished");
            self.start_next(&key);
            run.sink.on_final();
        }
    }

    /// Processes every result that has arrived, without blocking.
    ///
    /// Returns the number of results handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.pool.events().try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Blocks until every running and pending job has finished.
    ///
    /// # Errors
    ///
    /// [`WorkerError::Disconnected`] if the workers died with work in
    /// flight.
    pub fn wait_idle(&mut self) -> WorkerResult<()> {
        while !self.running.is_empty() {
            match self.pool.events().recv() {
                Ok(event) => self.handle(event),
                Err(_) => {
                    let in_flight = self.running.values().map(|r| r.started - r.finished).sum();
                    return Err(WorkerError::Disconnected { in_flight });
                }
            }
        }
        Ok(())
    }

    /// Stops the pool. Running jobs never reach `on_final`; pending calls
    /// are dropped.
    pub fn shutdown(mut self) {
        self.pending.clear();
        self.running.clear();
        self.pool.close();
        debug!("scheduler shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl WorkSink<u32, u32> for Recorder {
        fn prepare(&mut self, parts: usize) -> Vec<u32> {
            self.log.borrow_mut().push(format!("{}:prepare:{parts}", self.name));
            (0..parts as u32).collect()
        }

        fn on_result(&mut self, _result: u32) {}

        fn on_final(&mut self) {
            self.log.borrow_mut().push(format!("{}:final", self.name));
        }
    }

    fn recorder(name: &'static str, log: &Log) -> Box<dyn WorkSink<u32, u32>> {
        Box::new(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn test_allocation() {
        let sched: WorkScheduler<u32, u32> = WorkScheduler::new(8, |x| x).unwrap();
        // 8 / 3 = 2, 8 idle > 3 * 2 so one more
        assert_eq!(sched.allocation(3), 3);
        assert_eq!(sched.allocation(1), 8);
        assert_eq!(sched.allocation(2), 4);
        let small: WorkScheduler<u32, u32> = WorkScheduler::new(2, |x| x).unwrap();
        assert_eq!(small.allocation(3), 1);
    }

    #[test]
    fn test_busy_key_coalesces() {
        let log = Log::default();
        let mut sched = WorkScheduler::new(4, |x: u32| x).unwrap();
        assert_eq!(sched.start_work("k", 1, recorder("a", &log)), StartOutcome::Started(4));
        assert_eq!(sched.start_work("k", 1, recorder("b", &log)), StartOutcome::Coalesced);
        assert_eq!(sched.start_work("k", 1, recorder("c", &log)), StartOutcome::Coalesced);
        sched.wait_idle().unwrap();
        let log = log.borrow();
        assert_eq!(*log, ["a:prepare:4", "c:prepare:4", "a:final", "c:final"]);
    }

    #[test]
    fn test_starved_key_waits() {
        let log = Log::default();
        let mut sched = WorkScheduler::new(2, |x: u32| x).unwrap();
        assert_eq!(sched.start_work("a", 1, recorder("a", &log)), StartOutcome::Started(2));
        assert_eq!(sched.start_work("b", 1, recorder("b", &log)), StartOutcome::Queued);
        assert!(sched.has_pending("b"));
        sched.wait_idle().unwrap();
        assert!(sched.is_idle());
        assert_eq!(sched.available(), 2);
        assert!(log.borrow().contains(&"b:final".to_owned()));
    }

    #[test]
    fn test_empty_prepare_finishes_at_once() {
        struct Nothing(Rc<RefCell<bool>>);
        impl WorkSink<u32, u32> for Nothing {
            fn prepare(&mut self, _parts: usize) -> Vec<u32> {
                Vec::new()
            }
            fn on_result(&mut self, _result: u32) {}
            fn on_final(&mut self) {
                *self.0.borrow_mut() = true;
            }
        }

        let done = Rc::new(RefCell::new(false));
        let mut sched = WorkScheduler::new(2, |x: u32| x).unwrap();
        let outcome = sched.start_work("k", 1, Box::new(Nothing(Rc::clone(&done))));
        assert_eq!(outcome, StartOutcome::Started(0));
        assert!(*done.borrow());
        assert_eq!(sched.available(), 2);
        assert!(!sched.is_busy("k"));
    }
}
