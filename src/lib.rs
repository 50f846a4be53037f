//! BI Studio Library
//!
//! This library contains all the core modules for the BI Studio application.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub mod config;
pub mod embedded;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::Config;
pub use services::{
    CatalogService, CompatibilityService, DataCardService, DataSourceService, DimensionService,
    MetricService, OverviewService, ReportService, SeedData,
};

/// Application shared state
///
/// Every service is wrapped in Arc; construction order follows their dependencies.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub data_source_service: Arc<DataSourceService>,
    pub metric_service: Arc<MetricService>,
    pub dimension_service: Arc<DimensionService>,
    pub compatibility_service: Arc<CompatibilityService>,
    pub data_card_service: Arc<DataCardService>,
    pub report_service: Arc<ReportService>,
    pub overview_service: Arc<OverviewService>,
}

impl AppState {
    /// Load the catalog and, when enabled, the seed fixtures named by `config`
    pub fn load(config: &Config) -> anyhow::Result<Self> {
        let catalog = CatalogService::load(config.catalog_path().as_deref())?;
        let seed = if config.seed.enabled {
            SeedData::load(config.seed_path().as_deref())?
        } else {
            tracing::warn!("Seed data disabled by configuration, starting with empty stores");
            SeedData::default()
        };
        Ok(Self::from_parts(catalog, seed))
    }

    /// Wire every service around one catalog and one set of fixtures
    pub fn from_parts(catalog: CatalogService, seed: SeedData) -> Self {
        let catalog_service = Arc::new(catalog);

        let data_source_service =
            Arc::new(DataSourceService::new(services::data_sources_from_catalog(&catalog_service)));

        let metric_service =
            Arc::new(MetricService::new(seed.metrics, Arc::clone(&data_source_service)));

        let dimension_service = Arc::new(DimensionService::new(seed.dimensions));

        let compatibility_service = Arc::new(CompatibilityService::new(
            Arc::clone(&catalog_service),
            Arc::clone(&metric_service),
            Arc::clone(&dimension_service),
        ));

        let data_card_service = Arc::new(DataCardService::new(
            seed.data_cards,
            Arc::clone(&metric_service),
            Arc::clone(&dimension_service),
            Arc::clone(&compatibility_service),
        ));

        let report_service =
            Arc::new(ReportService::new(seed.reports, Arc::clone(&data_card_service)));

        let overview_service = Arc::new(OverviewService::new(
            Arc::clone(&data_source_service),
            Arc::clone(&metric_service),
            Arc::clone(&dimension_service),
            Arc::clone(&data_card_service),
            Arc::clone(&report_service),
        ));

        Self {
            catalog_service,
            data_source_service,
            metric_service,
            dimension_service,
            compatibility_service,
            data_card_service,
            report_service,
            overview_service,
        }
    }
}

/// API and probe routes, without docs or HTTP layers
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Data Sources
        .route(
            "/api/data-sources",
            get(handlers::data_source::list_data_sources)
                .post(handlers::data_source::create_data_source),
        )
        .route(
            "/api/data-sources/:id",
            get(handlers::data_source::get_data_source)
                .put(handlers::data_source::update_data_source)
                .delete(handlers::data_source::delete_data_source),
        )
        .route("/api/data-sources/:id/preview", get(handlers::data_source::preview_data_source))
        .route(
            "/api/data-sources/:id/test",
            post(handlers::data_source::test_data_source_connection),
        )
        // Metrics
        .route(
            "/api/metrics",
            get(handlers::metric::list_metrics).post(handlers::metric::create_metric),
        )
        .route(
            "/api/metrics/:id",
            get(handlers::metric::get_metric)
                .put(handlers::metric::update_metric)
                .delete(handlers::metric::delete_metric),
        )
        .route("/api/metrics/:id/preview", get(handlers::metric::preview_metric))
        .route(
            "/api/metrics/:id/recommended-dimensions",
            get(handlers::metric::recommended_dimensions),
        )
        // Dimensions
        .route(
            "/api/dimensions",
            get(handlers::dimension::list_dimensions).post(handlers::dimension::create_dimension),
        )
        .route(
            "/api/dimensions/:id",
            get(handlers::dimension::get_dimension)
                .put(handlers::dimension::update_dimension)
                .delete(handlers::dimension::delete_dimension),
        )
        .route("/api/dimensions/:id/preview", get(handlers::dimension::preview_dimension))
        // Data Cards
        .route(
            "/api/data-cards",
            get(handlers::data_card::list_data_cards).post(handlers::data_card::create_data_card),
        )
        .route(
            "/api/data-cards/:id",
            get(handlers::data_card::get_data_card)
                .put(handlers::data_card::update_data_card)
                .delete(handlers::data_card::delete_data_card),
        )
        .route("/api/data-cards/:id/preview", get(handlers::data_card::preview_data_card))
        .route("/api/data-cards/:id/validation", get(handlers::data_card::validate_data_card))
        // Reports
        .route(
            "/api/reports",
            get(handlers::report::list_reports).post(handlers::report::create_report),
        )
        .route(
            "/api/reports/:id",
            get(handlers::report::get_report)
                .put(handlers::report::update_report)
                .delete(handlers::report::delete_report),
        )
        .route("/api/reports/:id/preview", get(handlers::report::preview_report))
        .route(
            "/api/reports/:id/layout",
            get(handlers::report::get_report_layout).put(handlers::report::update_report_layout),
        )
        // Compatibility
        .route("/api/compatibility/check", post(handlers::compatibility::check_compatibility))
        // Catalog
        .route("/api/catalog/data-sources", get(handlers::catalog::list_catalog_data_sources))
        .route("/api/catalog/data-sources/:id/tables", get(handlers::catalog::list_catalog_tables))
        .route("/api/catalog/tables/lookup", post(handlers::catalog::lookup_table))
        .route("/api/catalog/tables/:table/fields", get(handlers::catalog::get_table_fields))
        .route(
            "/api/catalog/tables/:table/dimension-fields",
            get(handlers::catalog::get_dimension_fields),
        )
        .route("/api/catalog/tables/:table/related", get(handlers::catalog::get_related_tables))
        // Overview
        .route("/api/overview", get(handlers::overview::get_overview))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check));

    Router::new().merge(api_routes).merge(health_routes)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn ready_check() -> &'static str {
    "READY"
}
