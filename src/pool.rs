//! Stage worker pool
//!
//! Every parallel stage (combination, year and age decoration) runs on its own pool:
//! all units of work are queued up front followed by one stop sentinel per worker,
//! workers pull until they see a sentinel, and the stage ends only after every worker
//! has been joined. Results go to a shared [`ResultBuffer`].

use crossbeam_channel::{unbounded, Receiver};
use indicatif::ProgressBar;
use std::sync::{Mutex, PoisonError};
use std::thread;
use thiserror::Error;

/// Words buffered locally by a worker before they are appended to the shared buffer
const FLUSH_THRESHOLD: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to spawn worker {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {0} panicked")]
    WorkerPanicked(String),
}

/// Append-only word buffer shared by the workers of one stage
#[derive(Debug, Default)]
pub struct ResultBuffer {
    words: Mutex<Vec<String>>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of words. The lock is held for the append only.
    pub fn append(&self, batch: &mut Vec<String>) {
        if batch.is_empty() {
            return;
        }
        let mut words = self.words.lock().unwrap_or_else(PoisonError::into_inner);
        words.append(batch);
    }

    pub fn into_inner(self) -> Vec<String> {
        self.words.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Worker-local output, flushed into the shared buffer in batches
pub struct Batch<'a> {
    local: Vec<String>,
    shared: &'a ResultBuffer,
}

impl<'a> Batch<'a> {
    fn new(shared: &'a ResultBuffer) -> Self {
        Self {
            local: Vec::new(),
            shared,
        }
    }

    #[inline]
    pub fn push(&mut self, word: String) {
        self.local.push(word);
        if self.local.len() >= FLUSH_THRESHOLD {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        self.shared.append(&mut self.local);
    }
}

/// Queue message: a unit of work or a stop sentinel
enum Job<T> {
    Unit(T),
    Stop,
}

/// Fixed-size pool of named worker threads for one pipeline stage
pub struct WorkerPool {
    name: String,
    workers: usize,
    progress: ProgressBar,
}

impl WorkerPool {
    pub fn new(name: &str, workers: usize) -> Self {
        Self {
            name: name.to_string(),
            workers: workers.max(1),
            progress: ProgressBar::hidden(),
        }
    }

    /// Advance `progress` once per completed unit
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run `work` over every unit and return everything the workers produced.
    ///
    /// Returns only after the queue is drained and all workers are joined.
    /// Output order across units is unspecified.
    pub fn run<T, I, F>(&self, units: I, work: F) -> Result<Vec<String>, PoolError>
    where
        T: Send,
        I: IntoIterator<Item = T>,
        F: Fn(T, &mut Batch<'_>) + Sync,
    {
        let (tx, rx) = unbounded();
        let mut queued = 0usize;
        for unit in units {
            // The receiver is alive in this scope, sending cannot fail
            let _ = tx.send(Job::Unit(unit));
            queued += 1;
        }
        for _ in 0..self.workers {
            let _ = tx.send(Job::Stop);
        }
        drop(tx);

        log::debug!("{}: {} units queued for {} workers", self.name, queued, self.workers);

        let buffer = ResultBuffer::new();

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.workers);
            let mut spawn_error = None;

            for i in 0..self.workers {
                let name = format!("{}-{}", self.name, i);
                let rx = rx.clone();
                let (buffer, work, progress) = (&buffer, &work, &self.progress);

                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || worker_loop(rx, buffer, work, progress));

                match spawned {
                    Ok(handle) => handles.push((name, handle)),
                    Err(source) => {
                        // Already running workers still exit on their sentinels
                        spawn_error = Some(PoolError::Spawn { name, source });
                        break;
                    }
                }
            }

            // Every handle is joined here, the scope must not re-join a panicked worker
            let mut panicked = None;
            for (name, handle) in handles {
                if handle.join().is_err() {
                    log::error!("Worker {} panicked", name);
                    if panicked.is_none() {
                        panicked = Some(name);
                    }
                }
            }

            match (spawn_error, panicked) {
                (Some(err), _) => Err(err),
                (None, Some(name)) => Err(PoolError::WorkerPanicked(name)),
                (None, None) => Ok(()),
            }
        })?;

        Ok(buffer.into_inner())
    }
}

fn worker_loop<T, F>(rx: Receiver<Job<T>>, buffer: &ResultBuffer, work: &F, progress: &ProgressBar)
where
    F: Fn(T, &mut Batch<'_>),
{
    let mut batch = Batch::new(buffer);

    while let Ok(job) = rx.recv() {
        match job {
            Job::Unit(unit) => {
                work(unit, &mut batch);
                batch.flush();
                progress.inc(1);
            }
            Job::Stop => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn test_pool_drains_every_unit() {
        let pool = WorkerPool::new("test", 3);
        let processed = AtomicUsize::new(0);

        let mut out = pool
            .run(0..100u32, |n, batch| {
                processed.fetch_add(1, Ordering::Relaxed);
                batch.push(n.to_string());
            })
            .unwrap();

        assert_eq!(processed.load(Ordering::Relaxed), 100);
        out.sort_by_key(|s| s.parse::<u32>().unwrap());
        let expected: Vec<String> = (0..100u32).map(|n| n.to_string()).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_pool_with_fewer_units_than_workers() {
        let pool = WorkerPool::new("test", 8);
        let out = pool.run(["only"], |w, batch| batch.push(w.to_string())).unwrap();
        assert_eq!(out, vec!["only"]);

        let empty = pool.run(Vec::<u32>::new(), |_, _| {}).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_batches_larger_than_threshold() {
        let pool = WorkerPool::new("test", 2);
        let out = pool
            .run([FLUSH_THRESHOLD + 10], |n, batch| {
                for i in 0..n {
                    batch.push(i.to_string());
                }
            })
            .unwrap();
        assert_eq!(out.len(), FLUSH_THRESHOLD + 10);
    }

    #[test]
    fn test_worker_panic_fails_stage() {
        let pool = WorkerPool::new("test", 2);
        let result = pool.run(0..4u32, |n, _| {
            if n == 2 {
                panic!("boom");
            }
        });
        assert!(matches!(result, Err(PoolError::WorkerPanicked(_))));
    }

    #[test]
    fn test_two_panicking_workers_fail_stage() {
        let pool = WorkerPool::new("test", 2);
        let both_started = Barrier::new(2);

        // Each worker holds one unit at the barrier, then both panic
        let result = pool.run(0..2u32, |_, _| {
            both_started.wait();
            panic!("boom");
        });

        match result {
            Err(PoolError::WorkerPanicked(name)) => assert!(name.starts_with("test-")),
            other => panic!("expected a panicked worker, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_workers_falls_back_to_one() {
        let pool = WorkerPool::new("test", 0);
        let out = pool.run(0..3u32, |n, batch| batch.push(n.to_string())).unwrap();
        assert_eq!(out.len(), 3);
    }
}
