//! Prequential (test-then-train) replay.

use autogate_core::config::{defaults::DEFAULT_TIMESTAMP_COL, ReplayConfig};
use autogate_core::errors::ReplayError;
use autogate_core::traits::ThresholdStrategy;
use autogate_core::{fit_span, replay_span};
use tracing::info;

use crate::columns::ModelColumns;
use crate::event::EventTable;
use crate::prepare::{self, PreparedEvent};
use crate::response::{ResponseRow, ResponseTable};

/// Replays events in timestamp order, evaluating each event on the state
/// built from strictly earlier events and applying its feedback immediately
/// afterwards.
#[derive(Debug)]
pub struct Prequential<S> {
    strategy: S,
    columns: Vec<ModelColumns>,
    timestamp_col: String,
}

impl<S: ThresholdStrategy> Prequential<S> {
    pub fn new<I, M>(strategy: S, models: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: AsRef<str>,
    {
        Self {
            strategy,
            columns: models.into_iter().map(|m| ModelColumns::new(m.as_ref())).collect(),
            timestamp_col: DEFAULT_TIMESTAMP_COL.to_string(),
        }
    }

    /// Models and timestamp column from the `[replay]` config section.
    pub fn from_config(strategy: S, config: &ReplayConfig) -> Self {
        Self::new(strategy, &config.models).with_timestamp_col(&config.timestamp_col)
    }

    pub fn with_timestamp_col(mut self, timestamp_col: impl Into<String>) -> Self {
        self.timestamp_col = timestamp_col.into();
        self
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.model.as_str())
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

    /// Warm start: register every model, then apply the feedback of every
    /// event in timestamp order without recording responses.
    pub fn fit(&mut self, events: &EventTable) -> Result<(), ReplayError> {
        let prepared = prepare::prepare(events, &self.timestamp_col, &self.columns)?;
        let _span = fit_span!("prequential", prepared.len()).entered();

        prepare::register_all(&mut self.strategy, &self.columns);
        info!(models = self.columns.len(), "updating models with training events");
        for event in &prepared {
            self.train(event)?;
        }
        Ok(())
    }

    /// Test-then-train over the whole table. Models are registered first if
    /// they are not already.
    pub fn evaluate(&mut self, events: &EventTable) -> Result<ResponseTable, ReplayError> {
        let prepared = prepare::prepare(events, &self.timestamp_col, &self.columns)?;
        let _span = replay_span!("prequential", prepared.len()).entered();

        prepare::register_all(&mut self.strategy, &self.columns);
        let mut table = ResponseTable::new(self.columns.iter().map(|c| c.model.clone()).collect());
        for event in &prepared {
            let responses = prepare::evaluate(&self.strategy, &self.columns, event)?;
            table.push(ResponseRow {
                timestamp: None,
                responses,
            });
            self.train(event)?;
        }

        info!(rows = table.len(), "prequential evaluation finished");
        Ok(table)
    }

    fn train(&mut self, event: &PreparedEvent) -> Result<(), ReplayError> {
        prepare::apply(&mut self.strategy, &self.columns, &[event])?;
        Ok(())
    }
}
