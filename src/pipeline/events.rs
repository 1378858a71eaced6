//! Progress/log stream from the pipeline threads to whatever renders it (CLI, GUI, tests).

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::WordFrequency;

/// One status line. `Display` renders the human-readable text.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    ProducerStarted { name: String },
    ProducerStopped { name: String },
    WorkerStarted { name: String },
    WorkerStopped { name: String },
    /// Worker was blocked on the queue when the pipeline shut down.
    WorkerInterrupted { name: String },
    FileQueued { file: String },
    FileProcessing { file: String },
    WordStats { file: String, stats: WordFrequency },
    Similarity { file: String, score: f64 },
    FileFailed { file: String, message: String },
    RootMissing { root: PathBuf },
    WalkError { message: String },
    RescanScheduled { name: String, delay_secs: u64 },
    IdleInterrupted { name: String },
    SentinelSkipped { name: String },
    ReferenceLoaded { file: String, words: usize },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ProducerStarted { name } => write!(f, "Producer {name} started"),
            Event::ProducerStopped { name } => write!(f, "Producer {name} finished"),
            Event::WorkerStarted { name } => write!(f, "Worker {name} started"),
            Event::WorkerStopped { name } => write!(f, "Worker {name} finished"),
            Event::WorkerInterrupted { name } => {
                write!(f, "Worker {name} was interrupted while waiting")
            }
            Event::FileQueued { file } => write!(f, "Queued file for analysis: {file}"),
            Event::FileProcessing { file } => write!(f, "Processing file: {file}"),
            Event::WordStats { file, stats } => {
                write!(f, "Word statistics for {file}:")?;
                if stats.is_empty() {
                    return write!(f, "\n  no words in file (or all were filtered out)");
                }
                for (word, count) in stats {
                    write!(f, "\n  {word} = {count}")?;
                }
                Ok(())
            }
            Event::Similarity { file, score } => {
                write!(f, "  {file}: similarity to reference {score:.4}")
            }
            Event::FileFailed { file, message } => {
                write!(f, "Error while processing {file}: {message}")
            }
            Event::RootMissing { root } => write!(
                f,
                "Directory {} does not exist or is not a directory",
                root.display()
            ),
            Event::WalkError { message } => write!(f, "Walk error: {message}"),
            Event::RescanScheduled { name, delay_secs } => write!(
                f,
                "Producer {name} will rescan the directory in {delay_secs} seconds"
            ),
            Event::IdleInterrupted { name } => write!(f, "Producer {name} idle wait interrupted"),
            Event::SentinelSkipped { name } => write!(
                f,
                "Producer {name} was interrupted while sending a shutdown marker"
            ),
            Event::ReferenceLoaded { file, words } => {
                write!(f, "Loaded reference vector from {file} ({words} distinct words)")
            }
        }
    }
}

/// Sending half of the event stream. Every event is logged at debug level and fanned out to the
/// current subscribers; with none, the event is dropped after logging.
#[derive(Clone, Default)]
pub struct Reporter {
    subscribers: Arc<Mutex<Vec<Sender<Event>>>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// New receiver for every event emitted from now on.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = unbounded::<Event>();
        self.lock().push(tx);
        rx
    }

    /// Number of live subscribers. Dropped receivers are pruned on the next emit.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn emit(&self, event: Event) {
        log::debug!("{}", event);
        self.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sender<Event>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Reporter with one subscriber already attached: (reporter for pipeline threads, receiver for the
/// front-end).
pub fn event_channel() -> (Reporter, Receiver<Event>) {
    let reporter = Reporter::new();
    let events = reporter.subscribe();
    (reporter, events)
}
