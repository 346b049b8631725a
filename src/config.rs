use crate::error::{Error, Result};

pub const DEFAULT_MAX_NUMBER: usize = 100;
pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const DEFAULT_REPETITIONS: usize = 10;

/// Parameters driving one benchmark sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Size of the input range `[0, max_number)`.
    pub max_number: usize,
    /// Upper bound (inclusive) of the worker-count sweep.
    pub max_workers: usize,
    /// Timed runs per worker count.
    pub repetitions: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_number: DEFAULT_MAX_NUMBER,
            max_workers: DEFAULT_MAX_WORKERS,
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl SweepConfig {
    pub fn new(max_number: usize, max_workers: usize, repetitions: usize) -> Self {
        Self {
            max_number,
            max_workers,
            repetitions,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_input_size(self.max_number)?;
        if self.max_workers == 0 {
            return Err(Error::invalid("max_workers", "must be at least 1"));
        }
        if self.repetitions == 0 {
            return Err(Error::invalid("repetitions", "must be at least 1"));
        }
        Ok(())
    }
}

pub(crate) fn validate_input_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid("max_number", "must be at least 1"));
    }
    Ok(())
}

pub(crate) fn validate_workers(num_workers: usize) -> Result<()> {
    if num_workers == 0 {
        return Err(Error::invalid("num_workers", "must be at least 1"));
    }
    Ok(())
}
