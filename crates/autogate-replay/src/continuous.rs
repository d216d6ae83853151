//! Continuous re-evaluation: replay with delayed, batched feedback.

use autogate_core::config::{defaults, ReplayConfig};
use autogate_core::constants::MILLIS_PER_SECOND;
use autogate_core::errors::ReplayError;
use autogate_core::traits::ThresholdStrategy;
use autogate_core::{fit_span, flush_span, replay_span};
use tracing::{debug, info};

use crate::columns::ModelColumns;
use crate::event::EventTable;
use crate::prepare::{self, PreparedEvent};
use crate::response::{ResponseRow, ResponseTable};

/// Replays events in timestamp order while feedback lags behind.
///
/// Every event is evaluated on the current state and queued. The queue is
/// applied, in arrival order, when an event's timestamp exceeds the last
/// flush time plus the delay; the first event always flushes. Events queued
/// after the last flush are left unapplied when the stream ends; see
/// [`ContinuousReevaluation::unapplied`].
///
/// Timestamps are milliseconds; the delay is configured in seconds.
#[derive(Debug)]
pub struct ContinuousReevaluation<S> {
    strategy: S,
    columns: Vec<ModelColumns>,
    timestamp_col: String,
    delay_ms: f64,
    unapplied: usize,
}

impl<S: ThresholdStrategy> ContinuousReevaluation<S> {
    pub fn new<I, M>(strategy: S, models: I, delay_secs: u64) -> Self
    where
        I: IntoIterator<Item = M>,
        M: AsRef<str>,
    {
        Self {
            strategy,
            columns: models.into_iter().map(|m| ModelColumns::new(m.as_ref())).collect(),
            timestamp_col: defaults::DEFAULT_TIMESTAMP_COL.to_string(),
            delay_ms: delay_secs as f64 * MILLIS_PER_SECOND,
            unapplied: 0,
        }
    }

    /// Models, timestamp column, and delay from the `[replay]` config section.
    pub fn from_config(strategy: S, config: &ReplayConfig) -> Self {
        Self::new(strategy, &config.models, config.delay_secs)
            .with_timestamp_col(&config.timestamp_col)
    }

    pub fn with_timestamp_col(mut self, timestamp_col: impl Into<String>) -> Self {
        self.timestamp_col = timestamp_col.into();
        self
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.model.as_str())
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Events of the last `evaluate` that were queued after the final flush
    /// and never fed back.
    pub fn unapplied(&self) -> usize {
        self.unapplied
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn into_strategy(self) -> S {
        self.strategy
    }

    /// Warm start: register every model, then apply every event as its own
    /// batch, in timestamp order, without recording responses.
    pub fn fit(&mut self, events: &EventTable) -> Result<(), ReplayError> {
        let prepared = prepare::prepare(events, &self.timestamp_col, &self.columns)?;
        let _span = fit_span!("continuous_reevaluation", prepared.len()).entered();

        prepare::register_all(&mut self.strategy, &self.columns);
        info!(models = self.columns.len(), "updating models with training events");
        for event in &prepared {
            prepare::apply(&mut self.strategy, &self.columns, &[event])?;
        }
        Ok(())
    }

    /// Evaluate every event, applying queued feedback whenever the delay has
    /// elapsed. Rows carry the event timestamp.
    pub fn evaluate(&mut self, events: &EventTable) -> Result<ResponseTable, ReplayError> {
        let prepared = prepare::prepare(events, &self.timestamp_col, &self.columns)?;
        let _span = replay_span!("continuous_reevaluation", prepared.len()).entered();

        prepare::register_all(&mut self.strategy, &self.columns);
        let mut table = ResponseTable::new(self.columns.iter().map(|c| c.model.clone()).collect());
        let mut last_eval = f64::NEG_INFINITY;
        let mut queue: Vec<&PreparedEvent> = Vec::new();

        for event in &prepared {
            let responses = prepare::evaluate(&self.strategy, &self.columns, event)?;
            table.push(ResponseRow {
                timestamp: Some(event.timestamp),
                responses,
            });

            queue.push(event);
            if event.timestamp > last_eval + self.delay_ms {
                self.flush(&queue, event.timestamp)?;
                queue.clear();
                last_eval = event.timestamp;
            }
        }

        self.unapplied = queue.len();
        if !queue.is_empty() {
            debug!(unapplied = queue.len(), "stream ended before the next flush");
        }
        info!(rows = table.len(), "continuous re-evaluation finished");
        Ok(table)
    }

    fn flush(&mut self, queue: &[&PreparedEvent], timestamp: f64) -> Result<(), ReplayError> {
        let _span = flush_span!(queue.len(), timestamp).entered();
        prepare::apply(&mut self.strategy, &self.columns, queue)?;
        debug!(batch_size = queue.len(), "applied delayed feedback");
        Ok(())
    }
}
