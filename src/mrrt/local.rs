//! Single-process worker pool.
//!
//! One async reader streams input lines in batches and deals them out
//! round-robin to `workers` worker threads. Each worker maps its lines and
//! combines them into a map it owns. Once every worker has returned, the
//! partial maps are merged with the same reducer.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::combine;
use crate::mr::input::LineReader;
use crate::mr::{Counters, JobError, KeyValue, MRApp};

/// Batches buffered per worker before the reader waits.
const CHANNEL_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub struct LocalOptions {
    pub workers: NonZeroUsize,
    pub batch_lines: NonZeroUsize,
}

type Partial<V> = (HashMap<String, V>, Counters);

pub async fn run<A: MRApp>(
    app: Arc<A>,
    input_files: &[PathBuf],
    options: &LocalOptions,
) -> Result<Partial<A::Value>, JobError> {
    let workers = options.workers.get();
    let mut senders = Vec::with_capacity(workers);
    let mut handles: Vec<oneshot::Receiver<Result<Partial<A::Value>, anyhow::Error>>> = Vec::with_capacity(workers);
    for id in 0..workers {
        let (sender, receiver) = mpsc::channel::<Vec<String>>(CHANNEL_CAPACITY);
        let (done, handle) = oneshot::channel();
        let app = app.clone();
        // every worker must be running before the reader can block on its channel
        std::thread::Builder::new()
            .name(format!("mr-worker-{}", id))
            .spawn(move || {
                let res = worker(&*app, receiver);
                log::debug!("worker#{} done", id);
                let _ = done.send(res);
            })
            .map_err(|e| JobError::Failed(format!("cannot start worker#{}: {}", id, e)))?;
        handles.push(handle);
        senders.push(sender);
    }
    log::info!("started {} workers", workers);

    // senders are dropped when feeding ends, which lets the workers drain and return
    let fed = feed(input_files, senders, options.batch_lines.get()).await;

    let mut partials = Vec::with_capacity(workers);
    for (id, joined) in futures::future::join_all(handles).await.into_iter().enumerate() {
        match joined {
            Ok(Ok(partial)) => partials.push(partial),
            Ok(Err(e)) => return Err(JobError::Failed(format!("worker#{}: {:#}", id, e))),
            // the result sender is dropped without sending only when the worker panicked
            Err(_) => return Err(JobError::Failed(format!("worker#{} did not complete", id))),
        }
    }
    fed?;

    let mut counters = Counters::default();
    let mut results = HashMap::new();
    for (partial, worker_counters) in partials {
        counters.merge(&worker_counters);
        if results.is_empty() {
            results = partial;
            continue;
        }
        for (key, value) in partial {
            combine(&*app, &mut results, KeyValue { key, value })?;
        }
    }
    counters.reduce_output_records = results.len() as u64;
    Ok((results, counters))
}

fn worker<A: MRApp>(app: &A, mut batches: mpsc::Receiver<Vec<String>>) -> Result<Partial<A::Value>, anyhow::Error> {
    let mut partial = HashMap::new();
    let mut counters = Counters::default();
    while let Some(batch) = batches.blocking_recv() {
        for line in batch {
            counters.input_records += 1;
            for kv in app.map(&line)? {
                counters.map_output_records += 1;
                combine(app, &mut partial, kv)?;
            }
        }
    }
    counters.combine_output_records = partial.len() as u64;
    Ok((partial, counters))
}

async fn feed(
    input_files: &[PathBuf],
    senders: Vec<mpsc::Sender<Vec<String>>>,
    batch_lines: usize,
) -> Result<(), JobError> {
    let mut next = 0;
    let mut batch = Vec::with_capacity(batch_lines);
    for file in input_files {
        log::debug!("reading {}", file.display());
        let mut lines = LineReader::open(file).await?;
        while let Some(line) = lines.next_line().await? {
            batch.push(line);
            if batch.len() == batch_lines {
                let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_lines));
                dispatch(&senders, &mut next, full).await?;
            }
        }
    }
    if !batch.is_empty() {
        dispatch(&senders, &mut next, batch).await?;
    }
    log::debug!("fed {} batches", next);
    Ok(())
}

async fn dispatch(senders: &[mpsc::Sender<Vec<String>>], next: &mut usize, batch: Vec<String>) -> Result<(), JobError> {
    let id = *next % senders.len();
    *next += 1;
    senders[id]
        .send(batch)
        .await
        .map_err(|_| JobError::Failed(format!("worker#{} stopped accepting input", id)))
}
