//! Loading record exports and engine tuning for a CLI run.

use std::path::Path;

use anyhow::Context;
use leadmap_core::EngineConfig;
use leadmap_geo::{build_points, Point, RecordScope, ScrapedRecord};

/// Engine tuning from `path`, or the built-in defaults when no path is set.
pub(crate) fn engine_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => {
            let config = leadmap_core::load_engine_config(p)?;
            tracing::info!(path = %p.display(), "loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Parse a record export: either a bare JSON array of records or an object
/// with the records under `"data"`, as the record store's list endpoint returns.
pub(crate) fn parse_records(raw: &str) -> anyhow::Result<Vec<ScrapedRecord>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Export {
        Bare(Vec<ScrapedRecord>),
        Wrapped { data: Vec<ScrapedRecord> },
    }

    let export: Export =
        serde_json::from_str(raw).context("record export is not a list of scraped records")?;
    Ok(match export {
        Export::Bare(records) | Export::Wrapped { data: records } => records,
    })
}

/// Read the export at `path` and flatten it to points for the selected scope.
pub(crate) fn load_points(path: &Path, record: Option<String>) -> anyhow::Result<Vec<Point>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records = parse_records(&raw)?;
    let scope = record.map_or(RecordScope::All, RecordScope::Single);

    if let RecordScope::Single(id) = &scope {
        if !records.iter().any(|r| r.record_id() == Some(id.as_str())) {
            anyhow::bail!("record '{id}' not found in {}", path.display());
        }
    }

    let points = build_points(&records, &scope);
    tracing::info!(
        records = records.len(),
        points = points.len(),
        "loaded scraped records"
    );
    Ok(points)
}
