//! Serialized background execution for load, crop, and save jobs.
//!
//! A [`SerialWorker`] owns one background thread and two channels: jobs go
//! in, completions come out. Jobs run strictly in submission order, so a
//! crop queued after a load always sees the loaded state. Completions are
//! not delivered asynchronously; the owning thread collects them with
//! [`SerialWorker::drain`], keeping all engine state single-threaded.

use std::sync::mpsc;
use std::thread;

use tracing::debug;

type Job<C> = Box<dyn FnOnce() -> C + Send + 'static>;

/// A single-threaded ordered job queue with host-polled completions.
pub struct SerialWorker<C: Send + 'static> {
    jobs: Option<mpsc::Sender<Job<C>>>,
    results: mpsc::Receiver<C>,
    handle: Option<thread::JoinHandle<()>>,
}

impl<C: Send + 'static> SerialWorker<C> {
    pub fn new() -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job<C>>();
        let (result_tx, result_rx) = mpsc::channel::<C>();

        let handle = thread::spawn(move || {
            debug!("worker thread started");
            while let Ok(job) = job_rx.recv() {
                let completion = job();
                if result_tx.send(completion).is_err() {
                    break;
                }
            }
            debug!("worker thread exiting");
        });

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        }
    }

    /// Queue a job behind any already-submitted work.
    ///
    /// Silently dropped if the worker thread has died; the owner finds out
    /// by never seeing the completion.
    pub fn submit(&self, job: impl FnOnce() -> C + Send + 'static) {
        if let Some(jobs) = &self.jobs {
            if jobs.send(Box::new(job)).is_err() {
                debug!("job dropped, worker thread is gone");
            }
        }
    }

    /// Hand every finished completion to `f`, in job order, without
    /// blocking.
    pub fn drain(&mut self, mut f: impl FnMut(C)) {
        while let Ok(completion) = self.results.try_recv() {
            f(completion);
        }
    }
}

impl<C: Send + 'static> Default for SerialWorker<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Send + 'static> Drop for SerialWorker<C> {
    fn drop(&mut self) {
        // Closing the job channel lets the thread finish its queue and exit
        self.jobs = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
