//! Evaluation output tables.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::columns::{
    model_column, AUTO_PREFIX, ERR_PREFIX, FIELD_PREFIXES, LABEL_PREFIX, PROB_PREFIX, THS_PREFIX,
};

/// What one model looked like when one event was evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelResponse {
    /// Whether the prediction would have been auto-released.
    pub auto: bool,
    pub label: bool,
    pub prob: f64,
    /// Rolling performance at evaluation time.
    pub err: f64,
    /// Threshold at evaluation time.
    pub ths: f64,
}

/// One evaluated event. `responses` is aligned with the table's models.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    pub timestamp: Option<f64>,
    pub responses: Vec<ModelResponse>,
}

/// Evaluation rows in processing order, one per input event.
///
/// Serializes as a sequence of flat objects with `auto_<model>`,
/// `label_<model>`, `prob_<model>`, `err_<model>`, `ths_<model>` and, for the
/// delayed-batch replay, `timestamp`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTable {
    models: Vec<String>,
    rows: Vec<ResponseRow>,
}

impl ResponseTable {
    pub fn new(models: Vec<String>) -> Self {
        Self {
            models,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: ResponseRow) {
        debug_assert_eq!(row.responses.len(), self.models.len());
        self.rows.push(row);
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn model_index(&self, model: &str) -> Option<usize> {
        self.models.iter().position(|m| m == model)
    }

    /// Responses of a single model, in row order.
    pub fn model_responses(&self, model: &str) -> Option<Vec<ModelResponse>> {
        let idx = self.model_index(model)?;
        Some(self.rows.iter().map(|r| r.responses[idx]).collect())
    }

    /// One named output column as numbers (booleans as 0/1).
    ///
    /// Returns `None` for unknown columns, and for `timestamp` when the rows
    /// carry none.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        if name == "timestamp" {
            return self.rows.iter().map(|r| r.timestamp).collect();
        }
        let (prefix, model) = name.split_once('_')?;
        if !FIELD_PREFIXES.contains(&prefix) {
            return None;
        }
        let responses = self.model_responses(model)?;
        Some(
            responses
                .iter()
                .map(|r| match prefix {
                    AUTO_PREFIX => bool_value(r.auto),
                    LABEL_PREFIX => bool_value(r.label),
                    PROB_PREFIX => r.prob,
                    ERR_PREFIX => r.err,
                    _ => r.ths,
                })
                .collect(),
        )
    }

    /// Share of rows auto-released for `model`. NaN on an empty table.
    pub fn auto_release_rate(&self, model: &str) -> Option<f64> {
        let responses = self.model_responses(model)?;
        let released = responses.iter().filter(|r| r.auto).count();
        Some(released as f64 / responses.len() as f64)
    }

    /// Share of auto-released rows whose label is positive. NaN when nothing
    /// was released.
    pub fn accuracy_among_auto(&self, model: &str) -> Option<f64> {
        let responses = self.model_responses(model)?;
        let (released, correct) = responses
            .iter()
            .filter(|r| r.auto)
            .fold((0usize, 0usize), |(n, ok), r| (n + 1, ok + usize::from(r.label)));
        Some(correct as f64 / released as f64)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

struct RowView<'a> {
    models: &'a [String],
    row: &'a ResponseRow,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.row.timestamp.is_some());
        let mut map = serializer.serialize_map(Some(self.models.len() * 5 + extra))?;
        for (model, r) in self.models.iter().zip(&self.row.responses) {
            map.serialize_entry(&model_column(AUTO_PREFIX, model), &u8::from(r.auto))?;
            map.serialize_entry(&model_column(LABEL_PREFIX, model), &u8::from(r.label))?;
            map.serialize_entry(&model_column(PROB_PREFIX, model), &r.prob)?;
            map.serialize_entry(&model_column(ERR_PREFIX, model), &r.err)?;
            map.serialize_entry(&model_column(THS_PREFIX, model), &r.ths)?;
        }
        if let Some(ts) = self.row.timestamp {
            map.serialize_entry("timestamp", &ts)?;
        }
        map.end()
    }
}

impl Serialize for ResponseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView {
                models: &self.models,
                row,
            })?;
        }
        seq.end()
    }
}
