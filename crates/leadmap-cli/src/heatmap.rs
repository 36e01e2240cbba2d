//! Command handlers for `recommend` and `density`.

use leadmap_core::{AppConfig, EngineConfig};
use leadmap_geo::{
    annotate_density, compute_recommendations, heat_points, sample_seeds, ClusterSeed, DensePoint,
    HeatPoint, NearbyCitiesClient, Point,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct DensityOutput {
    pub points: Vec<DensePoint>,
    pub heat: Vec<HeatPoint>,
    pub seeds: Vec<ClusterSeed>,
}

pub(crate) fn density_output(points: Vec<Point>, engine: &EngineConfig) -> DensityOutput {
    let points = annotate_density(points, engine);
    let heat = heat_points(&points);
    let seeds = sample_seeds(&points, engine.seed_round_decimals, engine.max_seeds);
    DensityOutput {
        points,
        heat,
        seeds,
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Print the density layer without touching the network.
pub(crate) fn run_density(
    engine: &EngineConfig,
    points: Vec<Point>,
    pretty: bool,
) -> anyhow::Result<()> {
    print_json(&density_output(points, engine), pretty)
}

/// Run the full recommendation pipeline and print the report.
///
/// Lookup failures never fail the command; they show up as `seeds_failed`
/// and an empty or shorter recommendation list.
pub(crate) async fn run_recommend(
    app_config: &AppConfig,
    engine: &EngineConfig,
    points: Vec<Point>,
    pretty: bool,
) -> anyhow::Result<()> {
    let client = NearbyCitiesClient::from_app_config(app_config)?;
    let report = compute_recommendations(points, engine, &client).await;
    if report.recommendations.is_empty() {
        tracing::info!(
            seeds = report.seeds.len(),
            seeds_failed = report.seeds_failed,
            "no recommendations; heat map only"
        );
    }
    print_json(&report, pretty)
}
