//! Messages between the coordinator and the worker threads.
//!
//! The coordinator sends one [`WorkerMsg`] per task to a specific worker;
//! every worker reports back on one shared event channel.

/// Coordinator to worker.
#[derive(Debug)]
pub enum WorkerMsg<T> {
    /// Run the handler on `payload`.
    Task {
        /// Task key the payload belongs to
        key: String,
        /// Handler input
        payload: T,
    },
    /// Exit the worker loop.
    Close,
}

/// Worker to coordinator.
#[derive(Debug)]
pub enum WorkerEvent<R> {
    /// A task finished; the worker is idle again.
    Done {
        /// Index of the worker that ran it
        worker: usize,
        /// Task key
        key: String,
        /// Handler output
        result: R,
    },
}
