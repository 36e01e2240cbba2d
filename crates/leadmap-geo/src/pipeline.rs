//! Recommendation pipeline orchestration.
//!
//! 1. Annotate points with density.
//! 2. Sample sparse-first cluster seeds.
//! 3. Fetch nearby cities for each seed, sequentially.
//! 4. Drop explored and near-saturated candidates.
//! 5. Deduplicate, rank by distance and cap.
//!
//! Nothing in here fails: a run with no points or no successful fetches
//! simply produces an empty recommendation list alongside the density points.

use chrono::{DateTime, Utc};
use leadmap_core::EngineConfig;
use serde::Serialize;
use uuid::Uuid;

use crate::clusters::sample_seeds;
use crate::density::annotate_density;
use crate::fetch::fetch_candidates;
use crate::lookup::NearbyCityLookup;
use crate::recommend::{rank_recommendations, RecommendationFilter};
use crate::run::RunToken;
use crate::types::{ClusterSeed, DensePoint, Point, Recommendation};

/// Output of one computation pass, ready for the map layer.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Density-annotated points for the heat layer.
    pub points: Vec<DensePoint>,
    pub seeds: Vec<ClusterSeed>,
    pub recommendations: Vec<Recommendation>,
    pub seeds_failed: usize,
}

/// Run the full pipeline over `points`.
pub async fn compute_recommendations<L>(
    points: Vec<Point>,
    config: &EngineConfig,
    lookup: &L,
) -> RecommendationReport
where
    L: NearbyCityLookup,
{
    let (report, _) = run_pipeline(points, config, lookup, None, Uuid::new_v4()).await;
    report
}

/// Run the full pipeline on behalf of `token`.
///
/// Returns `None` when a newer run began before this one finished, in which
/// case its partial results must not be shown.
pub async fn compute_recommendations_for_run<L>(
    points: Vec<Point>,
    config: &EngineConfig,
    lookup: &L,
    token: &RunToken,
) -> Option<RecommendationReport>
where
    L: NearbyCityLookup,
{
    let (report, superseded) =
        run_pipeline(points, config, lookup, Some(token), token.run_id()).await;
    (!superseded && token.is_current()).then_some(report)
}

async fn run_pipeline<L>(
    points: Vec<Point>,
    config: &EngineConfig,
    lookup: &L,
    token: Option<&RunToken>,
    run_id: Uuid,
) -> (RecommendationReport, bool)
where
    L: NearbyCityLookup,
{
    let dense = annotate_density(points, config);
    let seeds = sample_seeds(&dense, config.seed_round_decimals, config.max_seeds);
    let filter = RecommendationFilter::new(&dense, config);

    let outcome = fetch_candidates(lookup, &seeds, config, token).await;
    let fetched = outcome.candidates.len();
    let survivors = filter.retain(outcome.candidates);
    let recommendations = rank_recommendations(survivors, config.max_recommendations);

    tracing::info!(
        %run_id,
        points = dense.len(),
        seeds = seeds.len(),
        seeds_failed = outcome.seeds_failed,
        explored_cities = filter.explored().city_count(),
        explored_areas = filter.explored().area_count(),
        saturated = filter.saturated_count(),
        fetched,
        recommended = recommendations.len(),
        superseded = outcome.superseded,
        "recommendation run finished"
    );

    let report = RecommendationReport {
        run_id,
        generated_at: Utc::now(),
        points: dense,
        seeds,
        recommendations,
        seeds_failed: outcome.seeds_failed,
    };
    (report, outcome.superseded)
}
