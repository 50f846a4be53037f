use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;

use crate::embedded;
use crate::models::{ConnectionStatus, DataCard, DataSource, Dimension, Metric, Report};
use crate::services::CatalogService;

/// Sample entities loaded at startup
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub data_cards: Vec<DataCard>,
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl SeedData {
    /// Load fixtures from `path`, or from the embedded resources when unset
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let text = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?,
            None => embedded::read_text(embedded::SEED_FILE)
                .context("Embedded seed resource is missing")?,
        };
        let seed: SeedData = serde_json::from_str(&text).context("Failed to parse seed data")?;
        tracing::info!(
            "Seed data loaded: {} metrics, {} dimensions, {} data cards, {} reports",
            seed.metrics.len(),
            seed.dimensions.len(),
            seed.data_cards.len(),
            seed.reports.len()
        );
        Ok(seed)
    }
}

/// Register every catalog data source with its type's default connection
pub fn data_sources_from_catalog(catalog: &CatalogService) -> Vec<DataSource> {
    let now = Utc::now();
    catalog
        .data_sources()
        .iter()
        .map(|ds| DataSource {
            id: ds.id,
            name: ds.name.clone(),
            source_type: ds.source_type,
            description: Some(ds.description.clone()),
            config: ds.source_type.default_config(),
            status: ConnectionStatus::Disconnected,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
