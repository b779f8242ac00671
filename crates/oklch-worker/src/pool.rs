//! Fixed set of worker threads.
//!
//! Each worker owns a command channel; all of them share one event channel
//! back to the coordinator. Workers hold no state between tasks.

use crate::error::{WorkerError, WorkerResult};
use crate::messages::{WorkerEvent, WorkerMsg};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Function run on a worker for every task.
pub type Handler<T, R> = Arc<dyn Fn(T) -> R + Send + Sync>;

struct Worker<T> {
    tx: Sender<WorkerMsg<T>>,
    handle: Option<JoinHandle<()>>,
}

/// Worker threads plus the receiving end of their event channel.
pub struct WorkerPool<T, R> {
    workers: Vec<Worker<T>>,
    events: Receiver<WorkerEvent<R>>,
}

impl<T, R> WorkerPool<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Spawns `size` workers running `handler`.
    ///
    /// # Errors
    ///
    /// [`WorkerError::EmptyPool`] for `size == 0`, [`WorkerError::Spawn`] if
    /// a thread cannot be created.
    pub fn spawn(size: usize, handler: Handler<T, R>) -> WorkerResult<Self> {
        if size == 0 {
            return Err(WorkerError::EmptyPool);
        }

        let (event_tx, events) = channel();
        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let (tx, rx) = channel();
            let handler = Arc::clone(&handler);
            let event_tx = event_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("oklch-worker-{index}"))
                .spawn(move || run_worker(index, rx, event_tx, handler))
                .map_err(|e| WorkerError::spawn(index, e))?;
            workers.push(Worker {
                tx,
                handle: Some(handle),
            });
        }
        debug!(size, "worker pool started");
        Ok(Self { workers, events })
    }
}

impl<T, R> WorkerPool<T, R> {
    /// Number of workers.
    #[inline]
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Sends a task to one worker. Returns `false` if the worker is gone.
    pub fn send(&self, worker: usize, key: &str, payload: T) -> bool {
        self.workers.get(worker).is_some_and(|w| {
            w.tx.send(WorkerMsg::Task {
                key: key.to_owned(),
                payload,
            })
            .is_ok()
        })
    }

    /// Event channel of the pool.
    #[inline]
    pub fn events(&self) -> &Receiver<WorkerEvent<R>> {
        &self.events
    }

    /// Stops every worker and waits for it to exit.
    ///
    /// Tasks already running finish first; their results are dropped.
    pub fn close(&mut self) {
        for worker in &self.workers {
            let _ = worker.tx.send(WorkerMsg::Close);
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl<T, R> Drop for WorkerPool<T, R> {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_worker<T, R>(index: usize, rx: Receiver<WorkerMsg<T>>, tx: Sender<WorkerEvent<R>>, handler: Handler<T, R>) {
    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMsg::Close => break,
            WorkerMsg::Task { key, payload } => {
                let result = handler(payload);
                if tx.send(WorkerEvent::Done { worker: index, key, result }).is_err() {
                    break;
                }
            }
        }
    }
    trace!(worker = index, "worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool() {
        let handler: Handler<u32, u32> = Arc::new(|x| x);
        assert!(matches!(WorkerPool::spawn(0, handler), Err(WorkerError::EmptyPool)));
    }

    #[test]
    fn test_roundtrip() {
        let pool: WorkerPool<u32, u32> = WorkerPool::spawn(2, Arc::new(|x| x * 2)).unwrap();
        assert!(pool.send(1, "k", 21));
        match pool.events().recv().unwrap() {
            WorkerEvent::Done { worker, key, result } => {
                assert_eq!((worker, key.as_str(), result), (1, "k", 42));
            }
        }
        assert!(!pool.send(5, "k", 1));
    }
}
