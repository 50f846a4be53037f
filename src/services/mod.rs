pub mod catalog_service;
pub mod compatibility_service;
pub mod data_card_service;
pub mod data_source_service;
pub mod dimension_service;
pub mod entity_store;
pub mod layout;
pub mod metric_service;
pub mod overview_service;
pub mod report_service;
pub mod seed;

pub use catalog_service::CatalogService;
pub use compatibility_service::CompatibilityService;
pub use data_card_service::DataCardService;
pub use data_source_service::DataSourceService;
pub use dimension_service::DimensionService;
pub use entity_store::{Entity, EntityStore};
pub use metric_service::{MetricService, build_formula};
pub use overview_service::OverviewService;
pub use report_service::ReportService;
pub use seed::{SeedData, data_sources_from_catalog};
