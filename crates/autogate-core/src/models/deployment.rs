//! Deployment snapshots consumed by the production gating service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::AUTO_RELEASE_PERFORMANCE_GATE;

/// Per-model entry of the deployed threshold artifact.
///
/// `is_auto` answers "may this model auto-release at all right now",
/// not "would this particular prediction be released".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub is_auto: u8,
    pub threshold: f64,
    pub performance: f64,
}

impl DeploymentRecord {
    /// Build a record from a threshold and the current rolling performance.
    pub fn from_state(threshold: f64, performance: f64) -> Self {
        Self {
            is_auto: u8::from(performance > AUTO_RELEASE_PERFORMANCE_GATE),
            threshold,
            performance,
        }
    }

    pub fn eligible(&self) -> bool {
        self.is_auto == 1
    }
}

/// Model id → deployment record, ordered by id for stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentManifest {
    records: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model_id: impl Into<String>, record: DeploymentRecord) {
        self.records.insert(model_id.into(), record);
    }

    pub fn get(&self, model_id: &str) -> Option<&DeploymentRecord> {
        self.records.get(model_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeploymentRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Render the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_eligibility_follows_performance_gate() {
        assert_eq!(DeploymentRecord::from_state(0.8, 0.99).is_auto, 1);
        assert_eq!(DeploymentRecord::from_state(0.8, 0.98).is_auto, 0);
        assert!(!DeploymentRecord::from_state(0.8, 0.5).eligible());
    }

    #[test]
    fn manifest_serializes_as_flat_object() {
        let mut manifest = DeploymentManifest::new();
        manifest.insert("application01", DeploymentRecord::from_state(0.9, 1.0));
        let json = manifest.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["application01"]["is_auto"], 1);
        assert_eq!(value["application01"]["threshold"], 0.9);
        assert_eq!(DeploymentManifest::from_json(&json).unwrap(), manifest);
    }
}
