//! Column naming for per-model event and response fields.

pub const AUTO_PREFIX: &str = "auto";
pub const LABEL_PREFIX: &str = "label";
pub const PROB_PREFIX: &str = "prob";
pub const ERR_PREFIX: &str = "err";
pub const THS_PREFIX: &str = "ths";

/// Per-model output fields, in column order.
pub const FIELD_PREFIXES: [&str; 5] = [AUTO_PREFIX, LABEL_PREFIX, PROB_PREFIX, ERR_PREFIX, THS_PREFIX];

/// `<prefix>_<model>`.
pub fn model_column(prefix: &str, model: &str) -> String {
    format!("{prefix}_{model}")
}

/// Input column names for one model, resolved once per replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelColumns {
    pub model: String,
    pub prob: String,
    pub label: String,
}

impl ModelColumns {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            prob: model_column(PROB_PREFIX, model),
            label: model_column(LABEL_PREFIX, model),
        }
    }
}
