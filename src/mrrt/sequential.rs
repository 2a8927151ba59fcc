use std::path::PathBuf;

use crate::mr::input::LineReader;
use crate::mr::{Counters, JobError, MRApp};

/// Maps every line, sorts the intermediate pairs by key and reduces each run
/// of equal keys. Output is sorted by key.
pub async fn run<A: MRApp>(app: &A, input_files: &[PathBuf]) -> Result<(Vec<(String, A::Value)>, Counters), JobError> {
    let mut counters = Counters::default();
    let mut intermediate = vec![];
    for file in input_files {
        let mut lines = LineReader::open(file).await?;
        while let Some(line) = lines.next_line().await? {
            counters.input_records += 1;
            intermediate.extend(app.map(&line)?);
        }
    }
    counters.map_output_records = intermediate.len() as u64;

    intermediate.sort_by(|a, b| a.key.cmp(&b.key));

    let mut out: Vec<(String, A::Value)> = vec![];
    for kv in intermediate {
        match out.last_mut() {
            Some((key, acc)) if *key == kv.key => app.reduce(key, acc, kv.value)?,
            _ => out.push((kv.key, kv.value)),
        }
    }
    counters.combine_output_records = counters.map_output_records;
    counters.reduce_output_records = out.len() as u64;

    Ok((out, counters))
}
