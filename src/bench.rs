//! Worker-count sweep that times repeated pool runs.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::buffer::ResultBuffer;
use crate::config::SweepConfig;
use crate::error::Result;
use crate::parallel::WorkerPool;
use crate::partition::Strategy;

/// Average wall-clock time of one full pool run at a given worker count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample {
    pub workers: usize,
    pub avg_seconds: f64,
}

impl TimingSample {
    pub fn average(&self) -> Duration {
        Duration::from_secs_f64(self.avg_seconds)
    }
}

/// A validated benchmark for one strategy. Each call to [`Benchmark::sweep`]
/// starts an independent pass over worker counts `1..=max_workers`.
pub struct Benchmark<F> {
    strategy: Strategy,
    config: SweepConfig,
    unit_fn: F,
}

impl<F> Benchmark<F>
where
    F: Fn(usize) -> bool + Sync,
{
    pub fn new(strategy: Strategy, config: SweepConfig, unit_fn: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            strategy,
            config,
            unit_fn,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn sweep(&self) -> Sweep<'_, F> {
        Sweep {
            bench: self,
            next_workers: 1,
            finished: false,
            last_buffer: None,
            on_repetition: None,
        }
    }
}

/// Lazy sequence of [`TimingSample`]s in increasing worker-count order.
/// Stops after the first failed run.
pub struct Sweep<'a, F> {
    bench: &'a Benchmark<F>,
    next_workers: usize,
    finished: bool,
    last_buffer: Option<ResultBuffer>,
    on_repetition: Option<Box<dyn FnMut(usize) + 'a>>,
}

impl<'a, F> Sweep<'a, F>
where
    F: Fn(usize) -> bool + Sync,
{
    /// Called with the worker count after every completed repetition, outside
    /// the timed region.
    pub fn on_repetition(mut self, callback: impl FnMut(usize) + 'a) -> Self {
        self.on_repetition = Some(Box::new(callback));
        self
    }

    /// Buffer of the last repetition of the most recent sample.
    pub fn last_buffer(&self) -> Option<&ResultBuffer> {
        self.last_buffer.as_ref()
    }

    fn measure(&mut self, workers: usize) -> Result<TimingSample> {
        let bench = self.bench;
        let Benchmark {
            strategy,
            config,
            unit_fn,
        } = bench;
        let pool = WorkerPool::new(workers)?;
        let mut elapsed = Duration::ZERO;

        for _ in 0..config.repetitions {
            let start = Instant::now();
            let buffer = pool.run(*strategy, config.max_number, unit_fn)?;
            elapsed += start.elapsed();

            self.last_buffer = Some(buffer);
            if let Some(callback) = self.on_repetition.as_mut() {
                callback(workers);
            }
        }

        let avg_seconds = elapsed.as_secs_f64() / config.repetitions as f64;
        debug!(%strategy, workers, avg_seconds, "sample measured");
        Ok(TimingSample {
            workers,
            avg_seconds,
        })
    }
}

impl<F> Iterator for Sweep<'_, F>
where
    F: Fn(usize) -> bool + Sync,
{
    type Item = Result<TimingSample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.next_workers > self.bench.config.max_workers {
            return None;
        }
        let workers = self.next_workers;
        self.next_workers += 1;

        let sample = self.measure(workers);
        if sample.is_err() {
            self.finished = true;
        }
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            (self.bench.config.max_workers + 1).saturating_sub(self.next_workers)
        };
        (0, Some(remaining))
    }
}

/// Run a whole sweep and collect its samples.
pub fn benchmark<F>(
    strategy: Strategy,
    config: SweepConfig,
    unit_fn: F,
) -> Result<Vec<TimingSample>>
where
    F: Fn(usize) -> bool + Sync,
{
    let bench = Benchmark::new(strategy, config, unit_fn)?;
    info!(
        %strategy,
        max_number = config.max_number,
        max_workers = config.max_workers,
        repetitions = config.repetitions,
        "running sweep"
    );
    bench.sweep().collect()
}
