use axum::Router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use bi_studio::config::Config;
use bi_studio::{AppState, build_router, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Data Sources
        handlers::data_source::list_data_sources,
        handlers::data_source::get_data_source,
        handlers::data_source::create_data_source,
        handlers::data_source::update_data_source,
        handlers::data_source::delete_data_source,
        handlers::data_source::preview_data_source,
        handlers::data_source::test_data_source_connection,
        // Metrics
        handlers::metric::list_metrics,
        handlers::metric::get_metric,
        handlers::metric::create_metric,
        handlers::metric::update_metric,
        handlers::metric::delete_metric,
        handlers::metric::preview_metric,
        handlers::metric::recommended_dimensions,
        // Dimensions
        handlers::dimension::list_dimensions,
        handlers::dimension::get_dimension,
        handlers::dimension::create_dimension,
        handlers::dimension::update_dimension,
        handlers::dimension::delete_dimension,
        handlers::dimension::preview_dimension,
        // Data Cards
        handlers::data_card::list_data_cards,
        handlers::data_card::get_data_card,
        handlers::data_card::create_data_card,
        handlers::data_card::update_data_card,
        handlers::data_card::delete_data_card,
        handlers::data_card::preview_data_card,
        handlers::data_card::validate_data_card,
        // Reports
        handlers::report::list_reports,
        handlers::report::get_report,
        handlers::report::create_report,
        handlers::report::update_report,
        handlers::report::delete_report,
        handlers::report::preview_report,
        handlers::report::get_report_layout,
        handlers::report::update_report_layout,
        // Compatibility
        handlers::compatibility::check_compatibility,
        // Catalog
        handlers::catalog::list_catalog_data_sources,
        handlers::catalog::list_catalog_tables,
        handlers::catalog::get_table_fields,
        handlers::catalog::get_dimension_fields,
        handlers::catalog::get_related_tables,
        handlers::catalog::lookup_table,
        // Overview
        handlers::overview::get_overview,
    ),
    components(
        schemas(
            models::DataSourceType,
            models::ConnectionConfig,
            models::ConnectionStatus,
            models::DataSource,
            models::DataSourceRequest,
            models::DataSourceDetail,
            models::ConnectionTestResponse,
            models::CalculationType,
            models::Aggregation,
            models::Metric,
            models::MetricRequest,
            models::MetricPreview,
            models::DimensionType,
            models::HierarchyType,
            models::DimensionConfig,
            models::Dimension,
            models::DimensionRequest,
            models::DimensionPreview,
            models::CardType,
            models::CardConfig,
            models::DataCard,
            models::DataCardRequest,
            models::CardPlaceholder,
            models::DataCardPreview,
            models::ReportType,
            models::LayoutTemplate,
            models::TimeRange,
            models::AutoRefresh,
            models::FilterOperator,
            models::ReportFilter,
            models::CardSize,
            models::ReportConfig,
            models::Report,
            models::ReportConfigRequest,
            models::ReportRequest,
            models::LayoutUpdateRequest,
            models::CardPlacement,
            models::ReportLayout,
            models::ReportCardPreview,
            models::ReportPreview,
            models::CompatibilityLevel,
            models::CompatibilityReport,
            models::CompatibilityCheckRequest,
            models::CardValidation,
            models::CatalogDataSource,
            models::TableOption,
            models::FieldInfo,
            models::TableLookupRequest,
            models::TableLookupResponse,
            models::RelatedTablesResponse,
            models::EntityCounts,
            models::RecentItem,
            models::Overview,
        )
    ),
    tags(
        (name = "Data Sources", description = "Data source registration and connection checks"),
        (name = "Metrics", description = "Metric definitions and formula generation"),
        (name = "Dimensions", description = "Dimension definitions"),
        (name = "Data Cards", description = "Visual cards pairing metrics with a dimension"),
        (name = "Reports", description = "Reports, layouts and previews"),
        (name = "Compatibility", description = "Dimension and metric compatibility checks"),
        (name = "Catalog", description = "Static tables, fields and relationships"),
        (name = "Overview", description = "Workspace overview"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first
    let config = Config::load()?;

    // Initialize logging
    let log_filter = tracing_subscriber::EnvFilter::new(&config.logging.level);

    let registry = tracing_subscriber::registry().with(log_filter);

    // Dropping the guard stops the file writer, keep it for the whole run
    let _log_guard = if let Some(log_file) = &config.logging.file {
        let log_path = std::path::Path::new(log_file);
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let log_dir = log_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("logs");
        let file_name = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("bi-studio.log");
        // Rolling appender adds a date suffix
        let file_prefix = file_name.strip_suffix(".log").unwrap_or(file_name);

        let file_appender = tracing_appender::rolling::daily(log_dir, file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
            .with(tracing_subscriber::fmt::layer())
            .init();
        Some(guard)
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };
    tracing::info!("BI Studio starting up");
    tracing::info!("Configuration loaded successfully");

    let app_state = AppState::load(&config)?;
    tracing::info!("Services initialized");

    let app_state_arc = Arc::new(app_state);

    // Build the main app router
    let app = Router::new()
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(build_router(Arc::clone(&app_state_arc)));

    let app = app
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API documentation available at http://{}/api-docs", addr);
    tracing::info!("BI Studio is ready to serve requests");

    axum::serve(listener, app).await?;

    Ok(())
}
