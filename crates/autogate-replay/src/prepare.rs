//! Validation, ordering, and the evaluate/apply steps shared by both drivers.

use autogate_core::errors::{ReplayError, ThresholdError};
use autogate_core::traits::ThresholdStrategy;

use crate::columns::ModelColumns;
use crate::event::EventTable;
use crate::response::ModelResponse;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Observation {
    pub prob: f64,
    pub label: bool,
}

/// One event with its model columns resolved, aligned with the replay's
/// `ModelColumns` slice.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedEvent {
    pub timestamp: f64,
    pub observations: Vec<Observation>,
}

/// Check every event and return them sorted ascending by timestamp.
///
/// All validation happens here, before any strategy is touched: the
/// timestamp column on every row first, then the model columns. Ties keep
/// arrival order.
pub(crate) fn prepare(
    table: &EventTable,
    timestamp_col: &str,
    columns: &[ModelColumns],
) -> Result<Vec<PreparedEvent>, ReplayError> {
    let mut order = table
        .iter()
        .enumerate()
        .map(|(row, event)| {
            event
                .get(timestamp_col)
                .map(|ts| (row, ts))
                .ok_or_else(|| ReplayError::MissingTimestamp {
                    field: timestamp_col.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let events: Vec<_> = table.iter().collect();
    order
        .into_iter()
        .map(|(row, timestamp)| -> Result<PreparedEvent, ReplayError> {
            let event = events[row];
            let observations = columns
                .iter()
                .map(|cols| -> Result<Observation, ReplayError> {
                    let prob = event.get(&cols.prob).ok_or_else(|| ReplayError::MissingColumn {
                        column: cols.prob.clone(),
                        row,
                    })?;
                    let raw = event.get(&cols.label).ok_or_else(|| ReplayError::MissingColumn {
                        column: cols.label.clone(),
                        row,
                    })?;
                    Ok(Observation {
                        prob,
                        label: parse_label(raw, &cols.label, row)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PreparedEvent {
                timestamp,
                observations,
            })
        })
        .collect()
}

fn parse_label(value: f64, column: &str, row: usize) -> Result<bool, ReplayError> {
    if value == 1.0 {
        Ok(true)
    } else if value == 0.0 {
        Ok(false)
    } else {
        Err(ReplayError::InvalidLabel {
            column: column.to_string(),
            row,
            value,
        })
    }
}

pub(crate) fn register_all<S>(strategy: &mut S, columns: &[ModelColumns])
where
    S: ThresholdStrategy + ?Sized,
{
    for cols in columns {
        strategy.register(&cols.model);
    }
}

/// Read-only evaluation of one event against the current strategy state.
pub(crate) fn evaluate<S>(
    strategy: &S,
    columns: &[ModelColumns],
    event: &PreparedEvent,
) -> Result<Vec<ModelResponse>, ThresholdError>
where
    S: ThresholdStrategy + ?Sized,
{
    columns
        .iter()
        .zip(&event.observations)
        .map(|(cols, obs)| {
            let ths = strategy.threshold(&cols.model)?;
            let err = strategy.get_performance(&cols.model)?;
            Ok(ModelResponse {
                auto: strategy.is_auto(&cols.model, obs.prob)?,
                label: obs.label,
                prob: obs.prob,
                err,
                ths,
            })
        })
        .collect()
}

/// Feed a batch of events back into the strategy, model by model.
///
/// Each model's threshold is read once at the start of the batch and the
/// release decision for every buffered event is `prob > threshold`.
pub(crate) fn apply<S>(
    strategy: &mut S,
    columns: &[ModelColumns],
    batch: &[&PreparedEvent],
) -> Result<(), ThresholdError>
where
    S: ThresholdStrategy + ?Sized,
{
    for (i, cols) in columns.iter().enumerate() {
        let ths = strategy.threshold(&cols.model)?;
        for event in batch {
            let obs = event.observations[i];
            strategy.update(&cols.model, obs.prob > ths, obs.label)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecord;

    fn cols() -> Vec<ModelColumns> {
        vec![ModelColumns::new("m")]
    }

    #[test]
    fn sorts_by_timestamp_keeping_ties_in_arrival_order() {
        let table: EventTable = [(3.0, 0.1), (1.0, 0.2), (3.0, 0.3), (2.0, 0.4)]
            .into_iter()
            .map(|(t, p)| {
                EventRecord::new()
                    .with("timestamp", t)
                    .with("prob_m", p)
                    .with("label_m", 1.0)
            })
            .collect();
        let prepared = prepare(&table, "timestamp", &cols()).unwrap();
        let probs: Vec<f64> = prepared.iter().map(|e| e.observations[0].prob).collect();
        assert_eq!(probs, vec![0.2, 0.4, 0.1, 0.3]);
    }

    #[test]
    fn missing_model_column_reports_input_row() {
        let table: EventTable = vec![
            EventRecord::new()
                .with("timestamp", 5.0)
                .with("prob_m", 0.5)
                .with("label_m", 0.0),
            EventRecord::new().with("timestamp", 1.0).with("prob_m", 0.5),
        ]
        .into_iter()
        .collect();
        let err = prepare(&table, "timestamp", &cols()).unwrap_err();
        match err {
            ReplayError::MissingColumn { column, row } => {
                assert_eq!(column, "label_m");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_binary_label_is_rejected() {
        let table: EventTable = vec![EventRecord::new()
            .with("timestamp", 1.0)
            .with("prob_m", 0.5)
            .with("label_m", 0.5)]
        .into_iter()
        .collect();
        assert!(matches!(
            prepare(&table, "timestamp", &cols()),
            Err(ReplayError::InvalidLabel { .. })
        ));
    }
}
