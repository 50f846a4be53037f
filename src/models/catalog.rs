use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

use crate::models::DataSourceType;

/// Static description of the data sources, their tables and fields.
///
/// Loaded once at startup and shared read-only by every service.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub data_sources: Vec<CatalogDataSource>,
    /// Table options per data source id
    pub data_source_tables: BTreeMap<i64, Vec<TableOption>>,
    pub table_fields: HashMap<String, Vec<FieldInfo>>,
    /// Fields offered as dimension candidates per table
    pub dimension_fields: HashMap<String, Vec<TableOption>>,
    /// Adjacency list; relatedness is checked in both directions
    pub relationships: HashMap<String, Vec<String>>,
    pub field_to_table: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogDataSource {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: DataSourceType,
    pub description: String,
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TableLookupRequest {
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableLookupResponse {
    pub table: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RelatedTablesResponse {
    pub table: String,
    pub related: Vec<String>,
}
