use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{Result, RmpError};

/// Thread pool owned by a single operator invocation. Every parallel stage
/// of the invocation runs inside [`WorkerPool::install`].
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Build a pool with `threads` workers, or one per available core when
    /// `threads` is 0.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .map_err(|e| RmpError::ResourceExhaustion(e.to_string()))?
        } else {
            threads
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rmp-worker-{i}"))
            .build()
            .map_err(|e| RmpError::ResourceExhaustion(e.to_string()))?;

        debug!(threads, "Worker pool ready");
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` with this pool as the target of every rayon call it makes.
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
