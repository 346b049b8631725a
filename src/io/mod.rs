use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::bench::TimingSample;
use crate::buffer::ResultBuffer;
use crate::partition::Strategy;

pub const TIMINGS_HEADER: &str = "Threads,Tempo";

/// Output file locations for one strategy's sweep.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub timings: PathBuf,
    pub primes: PathBuf,
}

impl ReportPaths {
    /// `threads<Label>.csv` and `primes<Label>.txt` inside `dir`.
    pub fn for_strategy<P: AsRef<Path>>(dir: P, strategy: Strategy) -> Self {
        let dir = dir.as_ref();
        Self {
            timings: dir.join(format!("threads{}.csv", strategy.label())),
            primes: dir.join(format!("primes{}.txt", strategy.label())),
        }
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Streams timing samples as CSV rows, one per worker count.
pub struct TimingWriter {
    writer: BufWriter<File>,
    rows_written: usize,
}

impl TimingWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut writer = create_file(path.as_ref())?;
        writeln!(writer, "{}", TIMINGS_HEADER)?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_sample(&mut self, sample: &TimingSample) -> Result<()> {
        writeln!(self.writer, "{},{}", sample.workers, sample.avg_seconds)?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

pub fn write_timings_csv<P: AsRef<Path>>(path: P, samples: &[TimingSample]) -> Result<()> {
    let mut writer = TimingWriter::new(path)?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    Ok(())
}

/// Write every true index of `buffer`, one per line.
pub fn write_primes<P: AsRef<Path>>(path: P, buffer: &ResultBuffer) -> Result<()> {
    let mut writer = create_file(path.as_ref())?;
    for index in buffer.true_indices() {
        writeln!(writer, "{}", index)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_primes<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open primes file: {}", path.display()))?;

    let mut primes = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = line.parse::<usize>().with_context(|| {
            format!("{}:{}: not an index: {:?}", path.display(), line_no + 1, line)
        })?;
        primes.push(value);
    }
    Ok(primes)
}

pub fn create_progress_bar(total_runs: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_runs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
