use chrono::Utc;
use validator::Validate;

use crate::models::{
    ConnectionStatus, ConnectionTestResponse, DataSource, DataSourceDetail, DataSourceQuery,
    DataSourceRequest,
};
use crate::services::EntityStore;
use crate::utils::{ApiError, ApiResult, contains_ignore_case};

pub struct DataSourceService {
    store: EntityStore<DataSource>,
}

impl DataSourceService {
    pub fn new(seed: Vec<DataSource>) -> Self {
        Self { store: EntityStore::new(seed) }
    }

    pub async fn list(&self, query: &DataSourceQuery) -> Vec<DataSource> {
        let search = query.search.as_deref().unwrap_or("").trim();
        let sources: Vec<DataSource> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|ds| query.source_type.is_none_or(|t| ds.source_type == t))
            .filter(|ds| {
                contains_ignore_case(&ds.name, search)
                    || ds.description.as_deref().is_some_and(|d| contains_ignore_case(d, search))
            })
            .collect();
        tracing::debug!("Listed {} data sources (search={:?})", sources.len(), search);
        sources
    }

    pub async fn get(&self, id: i64) -> ApiResult<DataSource> {
        self.store.get(id).await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    /// Display name of a data source, if it is registered
    pub async fn name_of(&self, id: i64) -> Option<String> {
        self.store.find(id).await.map(|ds| ds.name)
    }

    pub async fn create(&self, req: DataSourceRequest) -> ApiResult<DataSource> {
        let req = req.normalized();
        req.validate()?;
        let config = req.resolve_config().ok_or_else(|| mismatched_config(&req))?;

        let now = Utc::now();
        let created = self
            .store
            .insert_with(|id| DataSource {
                id,
                name: req.name,
                source_type: req.source_type,
                description: req.description,
                config,
                status: ConnectionStatus::Disconnected,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!("Data source created: {} (ID: {})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: DataSourceRequest) -> ApiResult<DataSource> {
        let req = req.normalized();
        req.validate()?;
        let config = req.resolve_config().ok_or_else(|| mismatched_config(&req))?;

        let updated = self
            .store
            .update_by_id(id, |current| {
                let config = config.with_secrets_from(&current.config);
                // A changed connection has not been tested yet
                let status = if current.config == config {
                    current.status
                } else {
                    ConnectionStatus::Disconnected
                };
                Ok(DataSource {
                    id: current.id,
                    name: req.name,
                    source_type: req.source_type,
                    description: req.description,
                    config,
                    status,
                    created_at: current.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!("Data source updated: ID {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let removed = self.store.remove_by_id(id).await?;
        tracing::info!("Data source deleted: {} (ID: {})", removed.name, id);
        Ok(())
    }

    pub async fn detail(&self, id: i64) -> ApiResult<DataSourceDetail> {
        Ok(DataSourceDetail::from(&self.store.get(id).await?))
    }

    /// Simulated connection check: a source connects when its config is complete
    pub async fn test_connection(&self, id: i64) -> ApiResult<ConnectionTestResponse> {
        let tested = self
            .store
            .update_by_id(id, |current| {
                let status = if current.config.is_complete() {
                    ConnectionStatus::Connected
                } else {
                    ConnectionStatus::Disconnected
                };
                Ok(DataSource { status, updated_at: Utc::now(), ..current.clone() })
            })
            .await?;

        let message = match tested.status {
            ConnectionStatus::Connected => "Connection succeeded".to_string(),
            ConnectionStatus::Disconnected => {
                tracing::warn!("Connection test failed for data source {}: incomplete config", id);
                format!("Connection failed: {} config is incomplete", tested.source_type.label())
            },
        };

        Ok(ConnectionTestResponse {
            id,
            status: tested.status,
            connection_info: tested.config.summary(),
            message,
        })
    }
}

fn mismatched_config(req: &DataSourceRequest) -> ApiError {
    ApiError::validation_error(format!(
        "Connection config does not match data source type {}",
        req.source_type.as_str()
    ))
}
