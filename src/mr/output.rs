//! Writing reduce output as `key\tvalue` lines.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt as _, BufWriter};

use super::JobError;
use crate::util;

pub const SUCCESS_MARKER: &str = "_SUCCESS";

pub fn part_name(partition: usize) -> String {
    format!("part-r-{:05}", partition)
}

pub async fn ensure_absent(dir: &Path) -> Result<(), JobError> {
    match fs::try_exists(dir).await {
        Ok(true) => Err(JobError::OutputExists(dir.to_path_buf())),
        Ok(false) => Ok(()),
        Err(e) => Err(JobError::io(dir, e)),
    }
}

/// Splits `results` into `n_partitions` key-sorted part files under `dir`,
/// then drops the success marker. Every partition gets a file, even if empty.
pub async fn write_partitions<V: Display>(
    dir: &Path,
    results: HashMap<String, V>,
    n_partitions: usize,
) -> Result<Vec<PathBuf>, JobError> {
    let mut partitions: Vec<Vec<(String, V)>> = (0..n_partitions).map(|_| vec![]).collect();
    for (key, value) in results {
        partitions[util::partition(&key, n_partitions)].push((key, value));
    }

    fs::create_dir_all(dir).await.map_err(|e| JobError::io(dir, e))?;
    let mut paths = Vec::with_capacity(n_partitions);
    for (i, mut entries) in partitions.into_iter().enumerate() {
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let path = dir.join(part_name(i));
        log::debug!("writing {} records to {}", entries.len(), path.display());
        write_sorted(&path, &entries).await?;
        paths.push(path);
    }

    let marker = dir.join(SUCCESS_MARKER);
    File::create(&marker).await.map_err(|e| JobError::io(&marker, e))?;
    Ok(paths)
}

pub async fn write_sorted<V: Display>(path: &Path, entries: &[(String, V)]) -> Result<(), JobError> {
    let file = File::create(path).await.map_err(|e| JobError::io(path, e))?;
    let mut out = BufWriter::new(file);
    for (key, value) in entries {
        out.write_all(format!("{}\t{}\n", key, value).as_bytes())
            .await
            .map_err(|e| JobError::io(path, e))?;
    }
    out.flush().await.map_err(|e| JobError::io(path, e))?;
    Ok(())
}
