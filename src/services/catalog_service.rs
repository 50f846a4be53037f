use std::path::Path;

use anyhow::Context;

use crate::embedded;
use crate::models::{Catalog, CatalogDataSource, FieldInfo, TableOption};
use crate::utils::{ApiError, ApiResult};

/// Read-only queries over the static data catalog
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Catalog,
}

impl CatalogService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Load the catalog from `path`, or from the embedded resources when unset
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let text = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file {}", path.display()))?,
            None => embedded::read_text(embedded::CATALOG_FILE)
                .context("Embedded catalog resource is missing")?,
        };
        let catalog: Catalog = serde_json::from_str(&text).context("Failed to parse catalog")?;
        tracing::info!(
            "Catalog loaded: {} data sources, {} tables, {} mapped fields",
            catalog.data_sources.len(),
            catalog.table_fields.len(),
            catalog.field_to_table.len()
        );
        Ok(Self::new(catalog))
    }

    pub fn data_sources(&self) -> &[CatalogDataSource] {
        &self.catalog.data_sources
    }

    pub fn tables_for(&self, data_source_id: i64) -> ApiResult<Vec<TableOption>> {
        self.catalog
            .data_source_tables
            .get(&data_source_id)
            .cloned()
            .ok_or_else(|| {
                ApiError::not_found(format!("No tables for data source {}", data_source_id))
            })
    }

    pub fn table_fields(&self, table: &str) -> ApiResult<Vec<FieldInfo>> {
        self.catalog
            .table_fields
            .get(table)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("Table {} not found", table)))
    }

    /// Dimension candidates for a known table; empty when none are listed
    pub fn dimension_fields(&self, table: &str) -> ApiResult<Vec<TableOption>> {
        if !self.catalog.table_fields.contains_key(table) {
            return Err(ApiError::not_found(format!("Table {} not found", table)));
        }
        Ok(self.catalog.dimension_fields.get(table).cloned().unwrap_or_default())
    }

    pub fn related_tables(&self, table: &str) -> Vec<String> {
        self.catalog.relationships.get(table).cloned().unwrap_or_default()
    }

    /// Either table lists the other as related
    pub fn are_related(&self, left: &str, right: &str) -> bool {
        let lists = |from: &str, to: &str| {
            self.catalog
                .relationships
                .get(from)
                .is_some_and(|related| related.iter().any(|t| t == to))
        };
        lists(left, right) || lists(right, left)
    }

    pub fn table_for_field(&self, field: &str) -> Option<&str> {
        self.catalog.field_to_table.get(field).map(String::as_str)
    }

    /// First table, in catalog order, whose columns include every field
    pub fn find_table_with_fields(&self, fields: &[String]) -> Option<String> {
        if fields.is_empty() {
            return None;
        }
        self.catalog
            .data_sources
            .iter()
            .flat_map(|ds| ds.tables.iter())
            .find(|table| {
                self.catalog.table_fields.get(table.as_str()).is_some_and(|columns| {
                    fields.iter().all(|f| columns.iter().any(|c| &c.name == f))
                })
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CatalogService {
        CatalogService::load(None).unwrap()
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = service();
        assert!(!catalog.data_sources().is_empty());
        assert_eq!(catalog.table_for_field("timestamp"), Some("vehicle_security_status"));
    }

    #[test]
    fn test_relationship_is_symmetric() {
        let catalog = service();
        assert!(catalog.are_related("vehicle_security_status", "anomaly_detection"));
        assert!(catalog.are_related("anomaly_detection", "vehicle_security_status"));
        assert!(!catalog.are_related("sensor_data", "ecu_communication"));
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let catalog = service();
        assert!(matches!(
            catalog.table_fields("no_such_table"),
            Err(ApiError::ResourceNotFound(_))
        ));
        assert!(catalog.related_tables("no_such_table").is_empty());
    }

    #[test]
    fn test_find_table_with_fields() {
        let catalog = service();
        let table = catalog.find_table_with_fields(&["confidence_score".to_string()]);
        assert_eq!(table.as_deref(), Some("anomaly_detection"));
        assert_eq!(catalog.find_table_with_fields(&[]), None);
        assert_eq!(catalog.find_table_with_fields(&["nope".to_string()]), None);
    }
}
