//! Monte-Carlo metrics: result types, the caller-owned results table, the
//! simulation driver, and artifact ranking.

pub mod driver;
pub mod ranking;

pub use driver::{
    run_metrics_parallel, run_metrics_simulation, score_artifacts_with_progress, MetricsRequest,
    MetricsRun, PairResult, Progress,
};
pub use ranking::{rank_artifacts, RankedArtifact};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which scoring function a metrics run evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Fraction of simulated upgrades whose substat profile reaches every
    /// desired stat floor.
    StatTargets,
    /// [MetricKind::StatTargets] scaled by the odds the artifact still
    /// belongs to a desired set bonus (the off-set penalty).
    SetWeightedStatTargets,
}

/// Aggregate of one (artifact, build, kind) evaluation. `iterations` is the
/// count actually completed; a cancelled run reports the true partial
/// count, never the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub kind: MetricKind,
    /// Aggregate value in [0, 1].
    pub value: f64,
    pub iterations: u32,
}

/// Driver lifecycle. A run is constructed idle, spends its whole loop
/// running, and ends completed or cancelled; the terminal state is carried
/// on [MetricsRun].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Caller-owned results table keyed by (artifact id, build id, kind).
/// Inserting replaces the previous entry for the same key; the engine never
/// stores results anywhere else.
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    entries: HashMap<(String, String, MetricKind), MetricResult>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, artifact_id: &str, build_id: &str, result: MetricResult) {
        self.entries.insert(
            (artifact_id.to_string(), build_id.to_string(), result.kind),
            result,
        );
    }

    pub fn get(&self, artifact_id: &str, build_id: &str, kind: MetricKind) -> Option<&MetricResult> {
        self.entries
            .get(&(artifact_id.to_string(), build_id.to_string(), kind))
    }

    /// Fold a finished run into the table, replacing stale entries.
    pub fn absorb(&mut self, run: &MetricsRun) {
        for pair in &run.results {
            self.insert(&pair.artifact_id, &pair.build_id, pair.result);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_the_same_key() {
        let mut table = MetricsTable::new();
        table.insert(
            "a",
            "b",
            MetricResult {
                kind: MetricKind::StatTargets,
                value: 0.25,
                iterations: 100,
            },
        );
        table.insert(
            "a",
            "b",
            MetricResult {
                kind: MetricKind::StatTargets,
                value: 0.5,
                iterations: 200,
            },
        );
        assert_eq!(table.len(), 1);
        let entry = table.get("a", "b", MetricKind::StatTargets).unwrap();
        assert_eq!(entry.value, 0.5);
        assert_eq!(entry.iterations, 200);
    }

    #[test]
    fn kinds_key_independently() {
        let mut table = MetricsTable::new();
        table.insert(
            "a",
            "b",
            MetricResult {
                kind: MetricKind::StatTargets,
                value: 0.25,
                iterations: 100,
            },
        );
        table.insert(
            "a",
            "b",
            MetricResult {
                kind: MetricKind::SetWeightedStatTargets,
                value: 0.05,
                iterations: 100,
            },
        );
        assert_eq!(table.len(), 2);
        assert!(table.get("a", "b", MetricKind::StatTargets).is_some());
        assert!(table.get("a", "c", MetricKind::StatTargets).is_none());
    }
}
