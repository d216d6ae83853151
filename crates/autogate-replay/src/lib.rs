//! # autogate-replay
//!
//! Drives time-ordered labeled event tables through a
//! [`ThresholdStrategy`](autogate_core::traits::ThresholdStrategy), capturing
//! an evaluation row for every event before the event's own feedback is
//! applied.
//!
//! - [`Prequential`]: feedback applied immediately after each evaluation.
//! - [`ContinuousReevaluation`]: feedback buffered and applied in batches
//!   once a configured delay has elapsed.

pub mod columns;
pub mod continuous;
pub mod event;
mod prepare;
pub mod prequential;
pub mod response;

pub use continuous::ContinuousReevaluation;
pub use event::{EventRecord, EventTable};
pub use prequential::Prequential;
pub use response::{ModelResponse, ResponseRow, ResponseTable};
