//! Orders scored artifacts for one build by metric value.

use serde::Serialize;

use crate::metrics::driver::PairResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedArtifact {
    pub artifact_id: String,
    pub value: f64,
    pub iterations: u32,
}

/// Keep the rows for `build_id` and sort them best-first: higher value wins,
/// ties go to the row backed by more iterations, then to the lower id so
/// the order is total.
pub fn rank_artifacts(results: Vec<PairResult>, build_id: &str) -> Vec<RankedArtifact> {
    let mut ranked: Vec<RankedArtifact> = results
        .into_iter()
        .filter(|pair| pair.build_id == build_id)
        .map(|pair| RankedArtifact {
            artifact_id: pair.artifact_id,
            value: pair.result.value,
            iterations: pair.result.iterations,
        })
        .collect();

    ranked.sort_by(|left, right| {
        right
            .value
            .total_cmp(&left.value)
            .then_with(|| right.iterations.cmp(&left.iterations))
            .then_with(|| left.artifact_id.cmp(&right.artifact_id))
    });

    ranked
}
