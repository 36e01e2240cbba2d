//! Sequential nearby-city fetching over cluster seeds.

use leadmap_core::EngineConfig;

use crate::lookup::{NearbyCityLookup, NearbyQuery};
use crate::run::RunToken;
use crate::types::{ClusterSeed, SourcedCandidate};

/// Everything gathered by one pass over the seeds.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub candidates: Vec<SourcedCandidate>,
    pub seeds_queried: usize,
    pub seeds_failed: usize,
    /// The run was superseded before every seed was queried.
    pub superseded: bool,
}

/// Query the lookup once per seed, one request at a time.
///
/// A failing seed is logged and contributes nothing; it never stops the
/// remaining seeds. When `token` is given and a newer run has begun, the loop
/// stops before issuing the next request.
pub async fn fetch_candidates<L>(
    lookup: &L,
    seeds: &[ClusterSeed],
    config: &EngineConfig,
    token: Option<&RunToken>,
) -> FetchOutcome
where
    L: NearbyCityLookup,
{
    let mut outcome = FetchOutcome::default();

    for seed in seeds {
        if token.is_some_and(|t| !t.is_current()) {
            tracing::info!(
                seed_city = %seed.city,
                remaining = seeds.len() - outcome.seeds_queried,
                "run superseded, stopping nearby-city fetches"
            );
            outcome.superseded = true;
            break;
        }

        let query = NearbyQuery::for_seed(seed, config);
        outcome.seeds_queried += 1;
        match lookup.nearby_cities(&query).await {
            Ok(cities) => {
                tracing::debug!(
                    seed_city = %seed.city,
                    seed_key = %seed.key,
                    count = cities.len(),
                    "fetched nearby cities"
                );
                outcome
                    .candidates
                    .extend(cities.into_iter().map(|candidate| SourcedCandidate {
                        candidate,
                        source_city: seed.city.clone(),
                    }));
            }
            Err(e) => {
                tracing::warn!(
                    seed_city = %seed.city,
                    seed_key = %seed.key,
                    error = %e,
                    "nearby-cities fetch failed"
                );
                outcome.seeds_failed += 1;
            }
        }
    }

    outcome
}
