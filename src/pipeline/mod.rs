//! Pipeline components: cancellation, work queue, producer, workers, results, controller.

pub mod cancel;
pub mod context;
pub mod controller;
pub mod events;
pub mod producer;
pub mod queue;
pub mod results;
pub mod worker;

pub use cancel::CancelToken;
pub use context::{RunContext, RunState};
pub use controller::{PipelineController, StopHandle};
pub use events::{Event, Reporter, event_channel};
pub use producer::{ScanOutcome, run_producer, scan_once};
pub use queue::{Cancelled, FileJob, WorkQueue};
pub use results::ResultAggregator;
pub use worker::run_worker;
