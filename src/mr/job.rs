use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{input, output, Counters, JobError, MRApp};
use crate::mrrt::local::{self, LocalOptions};

#[derive(Debug, Clone)]
pub struct JobConfig {
    /// A file, or a directory whose visible files are all read.
    pub input: PathBuf,
    /// Directory to create; must not exist yet.
    pub output: PathBuf,
    /// Worker pool size, and the number of output partitions.
    pub workers: NonZeroUsize,
    pub batch_lines: NonZeroUsize,
}

#[derive(Debug, Clone)]
pub struct JobStats {
    pub input_files: usize,
    pub output_files: Vec<PathBuf>,
    pub counters: Counters,
    pub elapsed: Duration,
}

pub struct Job<A> {
    name: String,
    app: Arc<A>,
    config: JobConfig,
}

impl<A: MRApp> Job<A> {
    pub fn new(name: impl Into<String>, app: A, config: JobConfig) -> Self {
        Job {
            name: name.into(),
            app: Arc::new(app),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(&self) -> Result<JobStats, JobError> {
        let start = Instant::now();
        let config = &self.config;
        log::info!("{}: {} -> {} with {} workers",
                   self.name, config.input.display(), config.output.display(), config.workers);

        output::ensure_absent(&config.output).await?;
        let files = input::input_files(&config.input).await?;
        log::info!("{}: {} input files", self.name, files.len());

        let options = LocalOptions {
            workers: config.workers,
            batch_lines: config.batch_lines,
        };
        let (results, counters) = local::run(self.app.clone(), &files, &options).await?;
        let output_files = output::write_partitions(&config.output, results, config.workers.get()).await?;

        let stats = JobStats {
            input_files: files.len(),
            output_files,
            counters,
            elapsed: start.elapsed(),
        };
        log::info!("{}: completed in {:?}", self.name, stats.elapsed);
        log::info!("{}: map input records={} map output records={} combine output records={} reduce output records={}",
                   self.name,
                   counters.input_records,
                   counters.map_output_records,
                   counters.combine_output_records,
                   counters.reduce_output_records);
        Ok(stats)
    }
}
