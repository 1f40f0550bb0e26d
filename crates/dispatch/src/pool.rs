// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;
use std::thread;

use rayon::ThreadPool;

use crate::errors::DispatchError;

/// Worker pool for operator batches.
///
/// One pool serves all concurrent operator invocations; ciphertext
/// work and circuit partitions both run on it. Cloning shares the
/// underlying threads.
#[derive(Clone)]
pub struct DispatchPool {
    pool: Arc<ThreadPool>,
}

impl DispatchPool {
    pub fn new(threads: usize) -> Result<Self, DispatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Subtract the given amount from the total number of available
    /// threads and return the result, with a floor of one.
    pub fn max_threads_minus(amount: usize) -> usize {
        let total_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        std::cmp::max(1, total_threads.saturating_sub(amount))
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub(crate) fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }
}
