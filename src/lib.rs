//! Static block partitioning versus a shared locked cursor, timed across
//! increasing worker counts.

pub mod bench;
pub mod buffer;
pub mod config;
pub mod error;
pub mod io;
pub mod parallel;
pub mod partition;
pub mod unit;

pub use bench::{benchmark, Benchmark, Sweep, TimingSample};
pub use buffer::ResultBuffer;
pub use config::SweepConfig;
pub use error::{Error, Result};
pub use parallel::WorkerPool;
pub use partition::{block_ranges, SharedCursor, Strategy};
