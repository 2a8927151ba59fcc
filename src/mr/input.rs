//! Input discovery and line reading.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt as _, BufReader};

use super::JobError;

/// Files to read for `path`: the file itself, or the visible regular files
/// directly inside a directory, in name order. Names starting with `_` or `.`
/// are skipped so a previous job's `_SUCCESS` marker is never read.
pub async fn input_files(path: &Path) -> Result<Vec<PathBuf>, JobError> {
    let meta = fs::metadata(path).await.map_err(|e| JobError::io(path, e))?;
    if meta.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut entries = fs::read_dir(path).await.map_err(|e| JobError::io(path, e))?;
    let mut files = vec![];
    while let Some(entry) = entries.next_entry().await.map_err(|e| JobError::io(path, e))? {
        if entry.file_name().to_string_lossy().starts_with(['_', '.']) {
            log::debug!("skipping hidden input {}", entry.path().display());
            continue;
        }
        let file_type = entry.file_type().await.map_err(|e| JobError::io(&entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    if files.is_empty() {
        return Err(JobError::NoInput(path.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// Reads a file one record at a time. A record ends at `\n`, `\r` or `\r\n`,
/// and the terminator is stripped. Invalid UTF-8 is replaced rather than
/// rejected.
pub struct LineReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    // previous record ended at `\r`; a `\n` right after it belongs to it
    skip_lf: bool,
}

impl LineReader {
    pub async fn open(path: &Path) -> Result<Self, JobError> {
        let file = File::open(path).await.map_err(|e| JobError::io(path, e))?;
        Ok(LineReader {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            skip_lf: false,
        })
    }

    pub async fn next_line(&mut self) -> Result<Option<String>, JobError> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = self.reader.fill_buf().await.map_err(|e| JobError::io(&self.path, e))?;
            if available.is_empty() {
                break;
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            read_any = true;
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    self.skip_lf = available[i] == b'\r';
                    self.buf.extend_from_slice(&available[..i]);
                    self.reader.consume(i + 1);
                    return Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()));
                }
                None => {
                    let n = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(n);
                }
            }
        }
        if !read_any {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
