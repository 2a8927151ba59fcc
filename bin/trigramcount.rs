use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Parser};
use trigrams::mr::job::{Job, JobConfig};
use trigrams::mrapps::{TrigramCount, JOB_NAME};

#[derive(Parser)]
#[command(name = "trigramcount", about = "Count three-word sequences across a text corpus")]
struct Args {
    /// Input file, or a directory of input files
    input_path: PathBuf,
    /// Output directory, must not exist
    output_path: PathBuf,
    /// Number of aggregation workers and output partitions
    num_workers: NonZeroUsize,
    /// Lines handed to a worker at a time
    #[arg(long, default_value = "1024")]
    batch_lines: NonZeroUsize,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let start = Instant::now();
    let args = Args::parse();
    trigrams::logging::init(args.verbose);

    let job = Job::new(JOB_NAME, TrigramCount, JobConfig {
        input: args.input_path,
        output: args.output_path,
        workers: args.num_workers,
        batch_lines: args.batch_lines,
    });

    match job.run().await {
        Ok(_) => {
            let secs = start.elapsed().as_secs_f64();
            println!("Total time taken by the map reduce job: {} seconds", secs);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{} failed: {}", job.name(), e);
            eprintln!("{}: {}", job.name(), e);
            ExitCode::from(e.exit_code())
        }
    }
}
