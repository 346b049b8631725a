use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::buffer::{ResultBuffer, SharedSlots};
use crate::config::{validate_input_size, validate_workers};
use crate::error::{Error, Result};
use crate::partition::{block_ranges, SharedCursor, Strategy};

/// Logical CPUs on this host.
pub fn host_parallelism() -> usize {
    num_cpus::get()
}

/// Runs a unit function over `[0, n)` on a fixed number of worker threads.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    num_workers: usize,
}

impl WorkerPool {
    pub fn new(num_workers: usize) -> Result<Self> {
        validate_workers(num_workers)?;
        Ok(Self { num_workers })
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Evaluate `unit_fn` for every index in `[0, n)` and return the results.
    ///
    /// Spawns exactly `num_workers` threads, each running one worker body, and
    /// blocks until all of them have finished.
    pub fn run<F>(&self, strategy: Strategy, n: usize, unit_fn: F) -> Result<ResultBuffer>
    where
        F: Fn(usize) -> bool + Sync,
    {
        validate_input_size(n)?;
        debug!(%strategy, workers = self.num_workers, n, "starting pool run");

        let threads = self.build_threads()?;
        let slots = SharedSlots::new(n);

        let outcomes = match strategy {
            Strategy::Static => {
                let ranges = block_ranges(n, self.num_workers);
                broadcast_workers(&threads, |worker| {
                    let range = ranges[worker].clone();
                    trace!(worker, start = range.start, end = range.end, "static block");
                    for i in range {
                        slots.set(i, unit_fn(i));
                    }
                })
            }
            Strategy::Dynamic => {
                let cursor = SharedCursor::new(n);
                broadcast_workers(&threads, |worker| {
                    let mut done = 0usize;
                    while let Some(i) = cursor.claim() {
                        slots.set(i, unit_fn(i));
                        done += 1;
                    }
                    trace!(worker, done, "cursor exhausted");
                })
            }
        };

        if let Some((worker, message)) = outcomes
            .into_iter()
            .enumerate()
            .find_map(|(worker, outcome)| outcome.err().map(|message| (worker, message)))
        {
            return Err(Error::WorkerFailure { worker, message });
        }

        Ok(slots.freeze())
    }

    fn build_threads(&self) -> Result<ThreadPool> {
        let threads = ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .thread_name(|i| format!("primesweep-worker-{}", i))
            .build()?;
        Ok(threads)
    }
}

/// Run `body` once on every thread of `threads`, passing the worker index.
/// A panicking worker is reported in its slot instead of tearing down the others.
fn broadcast_workers<W>(threads: &ThreadPool, body: W) -> Vec<std::result::Result<(), String>>
where
    W: Fn(usize) + Sync,
{
    threads.broadcast(|ctx| {
        let worker = ctx.index();
        panic::catch_unwind(AssertUnwindSafe(|| body(worker))).map_err(panic_message)
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::is_prime;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;

    fn counting_run(strategy: Strategy, n: usize, workers: usize) -> (ResultBuffer, Vec<usize>) {
        let writes: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
        let buffer = WorkerPool::new(workers)
            .unwrap()
            .run(strategy, n, |i| {
                writes[i].fetch_add(1, Ordering::SeqCst);
                is_prime(i)
            })
            .unwrap();
        (buffer, writes.into_iter().map(AtomicUsize::into_inner).collect())
    }

    #[test]
    fn test_every_index_written_once() {
        for strategy in Strategy::ALL {
            for n in [1, 2, 7, 64, 257] {
                for workers in [1, 2, 3, 8, n + 5] {
                    let (buffer, writes) = counting_run(strategy, n, workers);
                    assert_eq!(buffer.len(), n);
                    assert!(
                        writes.iter().all(|&count| count == 1),
                        "{} n={} workers={} writes={:?}",
                        strategy,
                        n,
                        workers,
                        writes
                    );
                }
            }
        }
    }

    #[test]
    fn test_strategies_agree() {
        let n = 40;
        let unit = |i: usize| i % 3 == 0 || is_prime(i);
        for workers in 1..=n + 5 {
            let pool = WorkerPool::new(workers).unwrap();
            let fixed = pool.run(Strategy::Static, n, unit).unwrap();
            let shared = pool.run(Strategy::Dynamic, n, unit).unwrap();
            assert_eq!(fixed, shared, "workers={}", workers);
        }
    }

    #[test]
    fn test_primes_below_twenty() {
        for strategy in Strategy::ALL {
            let buffer = WorkerPool::new(4).unwrap().run(strategy, 20, is_prime).unwrap();
            assert_eq!(buffer.true_indices(), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        }
    }

    #[test]
    fn test_static_uses_exactly_num_workers_threads() {
        let seen = Mutex::new(HashSet::new());
        WorkerPool::new(5)
            .unwrap()
            .run(Strategy::Static, 50, |i| {
                seen.lock().unwrap().insert(thread::current().id());
                i % 2 == 0
            })
            .unwrap();
        assert_eq!(seen.into_inner().unwrap().len(), 5);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = WorkerPool::new(0).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_zero_items_rejected_before_spawning() {
        let calls = AtomicUsize::new(0);
        for strategy in Strategy::ALL {
            let err = WorkerPool::new(2)
                .unwrap()
                .run(strategy, 0, |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    true
                })
                .unwrap_err();
            assert!(err.is_invalid_configuration());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_worker_panic_fails_whole_run() {
        for strategy in Strategy::ALL {
            let err = WorkerPool::new(3)
                .unwrap()
                .run(strategy, 30, |i| {
                    if i == 17 {
                        panic!("bad index {}", i);
                    }
                    true
                })
                .unwrap_err();
            match err {
                Error::WorkerFailure { worker, message } => {
                    assert!(worker < 3);
                    assert_eq!(message, "bad index 17");
                }
                other => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn test_host_parallelism_positive() {
        assert!(host_parallelism() >= 1);
    }
}
