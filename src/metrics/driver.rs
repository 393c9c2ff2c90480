//! Monte-Carlo simulation driver.
//!
//! One invocation evaluates a single artifact against one or more builds:
//! per iteration the artifact is rolled from its *current* level to its
//! rarity cap, the build's substat profile is recomputed with the simulated
//! artifact equipped, and the stat-target scorer decides whether the
//! iteration satisfied. The aggregate is the satisfied fraction.
//!
//! The progress callback and the cancellation probe are the only suspension
//! points; both run exactly once per iteration. Cancellation is advisory:
//! once observed the driver stops early and reports the iteration count it
//! actually finished.

use rayon::prelude::*;

use crate::data::artifact::Artifact;
use crate::data::build::Build;
use crate::data::odds::OddsTable;
use crate::error::{SimError, SimResult};
use crate::metrics::{MetricKind, MetricResult, RunState};
use crate::parallel::batch_ranges;
use crate::roll::rng::Rng;
use crate::roll::roller::roll_to_max;
use crate::scoring::satisfaction::target_stats_satisfaction;
use crate::scoring::set_odds::weighted_set_factor;

/// Number of progress-reporting batches for inventory sweeps (UI jobs).
const SWEEP_PROGRESS_BATCH_COUNT: usize = 40;

/// Parameters of one metrics run.
#[derive(Debug, Clone, Copy)]
pub struct MetricsRequest {
    pub iterations: u32,
    pub kind: MetricKind,
    /// Base seed; each (artifact, build) pair derives its own generator
    /// from it, so pair results are independent of evaluation order.
    pub seed: u64,
}

/// Fraction of total work finished across every (artifact, build) pair of
/// one driver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Result row for one (artifact, build) pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PairResult {
    pub artifact_id: String,
    pub build_id: String,
    pub result: MetricResult,
}

/// Outcome of a driver invocation: the terminal state plus one row per
/// requested pair. Pairs the run never reached report zero iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRun {
    pub state: RunState,
    pub results: Vec<PairResult>,
}

/// Stable per-pair seed feeding every draw in one pair's loop. Folding both
/// ids keeps pairs independent of build-list order and of each other, which
/// is also what makes the parallel path reproduce the sequential one.
fn pair_seed(seed: u64, artifact_id: &str, build_id: &str) -> u64 {
    let mut acc = seed;
    for byte in artifact_id.bytes().chain([0u8]).chain(build_id.bytes()) {
        acc = acc.wrapping_mul(37).wrapping_add(u64::from(byte));
    }
    acc
}

/// Evaluate every build against `artifact`, reporting progress after each
/// iteration and checking `is_cancelled` cooperatively at the same cadence.
/// On cancellation the partial aggregates are returned with their true
/// iteration counts and `RunState::Cancelled`.
pub fn run_metrics_simulation<T, F, C>(
    tables: &T,
    artifact: &Artifact,
    builds: &[Build],
    request: MetricsRequest,
    mut on_progress: F,
    mut is_cancelled: C,
) -> SimResult<MetricsRun>
where
    T: OddsTable + ?Sized,
    F: FnMut(Progress),
    C: FnMut() -> bool,
{
    if request.iterations == 0 {
        return Err(SimError::ZeroIterations);
    }
    let total = builds.len() as u64 * u64::from(request.iterations);
    let mut state = RunState::Running;
    let mut results = Vec::with_capacity(builds.len());
    let mut completed_overall = 0u64;

    for build in builds {
        let factor = set_factor_for(tables, artifact, build, request.kind)?;
        let mut rng = Rng::new(pair_seed(request.seed, &artifact.id, &build.id));
        let mut satisfied = 0u32;
        let mut completed = 0u32;

        if state == RunState::Running {
            for _ in 0..request.iterations {
                let rolled = roll_to_max(tables, artifact, &mut rng)?;
                let profile = build.substat_profile_with(&rolled);
                if target_stats_satisfaction(&profile, &build.desired_stats).satisfied {
                    satisfied += 1;
                }
                completed += 1;
                completed_overall += 1;
                on_progress(Progress {
                    completed: completed_overall,
                    total,
                });
                if is_cancelled() {
                    state = RunState::Cancelled;
                    break;
                }
            }
        }

        results.push(PairResult {
            artifact_id: artifact.id.clone(),
            build_id: build.id.clone(),
            result: MetricResult {
                kind: request.kind,
                value: aggregate(factor, satisfied, completed),
                iterations: completed,
            },
        });
    }

    if state == RunState::Running {
        state = RunState::Completed;
    }
    Ok(MetricsRun { state, results })
}

/// Like [run_metrics_simulation] but fans the builds out across the Rayon
/// pool, without progress or cancellation. Per-pair seeding makes the
/// results identical to the sequential driver for the same request.
pub fn run_metrics_parallel<T>(
    tables: &T,
    artifact: &Artifact,
    builds: &[Build],
    request: MetricsRequest,
) -> SimResult<Vec<PairResult>>
where
    T: OddsTable + Sync + ?Sized,
{
    if request.iterations == 0 {
        return Err(SimError::ZeroIterations);
    }
    builds
        .par_iter()
        .map(|build| run_pair(tables, artifact, build, request))
        .collect()
}

/// Inventory sweep: score every artifact against every build, batching the
/// artifact list so `on_progress(done, total)` fires once per batch while
/// each batch runs on the Rayon pool.
pub fn score_artifacts_with_progress<T, F>(
    tables: &T,
    artifacts: &[Artifact],
    builds: &[Build],
    request: MetricsRequest,
    mut on_progress: F,
) -> SimResult<Vec<PairResult>>
where
    T: OddsTable + Sync + ?Sized,
    F: FnMut(u32, u32),
{
    if request.iterations == 0 {
        return Err(SimError::ZeroIterations);
    }
    let total = artifacts.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    // Report total immediately so a UI shows "0 / total" while the first
    // batch runs.
    on_progress(0, total as u32);

    let ranges = batch_ranges(total, SWEEP_PROGRESS_BATCH_COUNT.min(total));
    let mut all_results = Vec::with_capacity(total * builds.len());
    for (start, end) in ranges {
        let batch: SimResult<Vec<Vec<PairResult>>> = artifacts[start..end]
            .par_iter()
            .map(|artifact| {
                builds
                    .iter()
                    .map(|build| run_pair(tables, artifact, build, request))
                    .collect()
            })
            .collect();
        all_results.extend(batch?.into_iter().flatten());
        on_progress(end as u32, total as u32);
    }
    Ok(all_results)
}

/// Full-length evaluation of one pair; the unit of work both parallel entry
/// points distribute.
fn run_pair<T>(
    tables: &T,
    artifact: &Artifact,
    build: &Build,
    request: MetricsRequest,
) -> SimResult<PairResult>
where
    T: OddsTable + ?Sized,
{
    let factor = set_factor_for(tables, artifact, build, request.kind)?;
    let mut rng = Rng::new(pair_seed(request.seed, &artifact.id, &build.id));
    let mut satisfied = 0u32;
    for _ in 0..request.iterations {
        let rolled = roll_to_max(tables, artifact, &mut rng)?;
        let profile = build.substat_profile_with(&rolled);
        if target_stats_satisfaction(&profile, &build.desired_stats).satisfied {
            satisfied += 1;
        }
    }
    Ok(PairResult {
        artifact_id: artifact.id.clone(),
        build_id: build.id.clone(),
        result: MetricResult {
            kind: request.kind,
            value: aggregate(factor, satisfied, request.iterations),
            iterations: request.iterations,
        },
    })
}

fn set_factor_for<T>(
    tables: &T,
    artifact: &Artifact,
    build: &Build,
    kind: MetricKind,
) -> SimResult<f64>
where
    T: OddsTable + ?Sized,
{
    match kind {
        MetricKind::StatTargets => Ok(1.0),
        MetricKind::SetWeightedStatTargets => weighted_set_factor(tables, artifact, build),
    }
}

fn aggregate(factor: f64, satisfied: u32, completed: u32) -> f64 {
    if completed == 0 {
        0.0
    } else {
        factor * f64::from(satisfied) / f64::from(completed)
    }
}
