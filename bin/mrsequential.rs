use std::path::PathBuf;

use clap::Parser;
use trigrams::mr::{input, output};
use trigrams::mrapps::TrigramCount;
use trigrams::mrrt::sequential;

/// Single-threaded reference run: one key-sorted output file.
#[derive(Parser)]
#[command(name = "mrsequential")]
struct Args {
    input_path: PathBuf,
    output_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    trigrams::logging::init(0);
    let args = Args::parse();

    let files = input::input_files(&args.input_path).await?;
    log::info!("files: {:?}", files);

    let (results, counters) = sequential::run(&TrigramCount, &files).await?;
    output::write_sorted(&args.output_file, &results).await?;
    log::info!("{} trigrams from {} lines written to {}",
               counters.reduce_output_records, counters.input_records, args.output_file.display());

    Ok(())
}
