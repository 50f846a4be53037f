use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::StringExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    Mysql,
    Postgresql,
    Api,
    Iot,
    Security,
    Monitoring,
    File,
}

impl DataSourceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mysql => "MySQL Database",
            Self::Postgresql => "PostgreSQL Database",
            Self::Api => "API Endpoint",
            Self::Iot => "IoT Device Source",
            Self::Security => "Network Security Source",
            Self::Monitoring => "System Monitoring Source",
            Self::File => "File Upload",
        }
    }

    /// Connection config a freshly registered source of this type starts with
    pub fn default_config(&self) -> ConnectionConfig {
        match self {
            Self::Mysql | Self::Postgresql => ConnectionConfig::Database {
                host: Some("localhost".to_string()),
                port: Some(if *self == Self::Mysql { 3306 } else { 5432 }),
                database: Some(format!("{}_db", self.as_str())),
                username: Some("admin".to_string()),
                password: None,
            },
            Self::Api | Self::Iot | Self::Security | Self::Monitoring => {
                let host = if *self == Self::Api { "example" } else { self.as_str() };
                ConnectionConfig::Api {
                    endpoint: Some(format!("https://api.{}.com/data", host)),
                    auth_type: Some("bearer".to_string()),
                    token: Some(format!("{}_token", self.as_str())),
                }
            },
            Self::File => ConnectionConfig::File { file_type: None },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Api => "api",
            Self::Iot => "iot",
            Self::Security => "security",
            Self::Monitoring => "monitoring",
            Self::File => "file",
        }
    }

    fn accepts(&self, config: &ConnectionConfig) -> bool {
        matches!(
            (self, config),
            (Self::Mysql | Self::Postgresql, ConnectionConfig::Database { .. })
                | (
                    Self::Api | Self::Iot | Self::Security | Self::Monitoring,
                    ConnectionConfig::Api { .. }
                )
                | (Self::File, ConnectionConfig::File { .. })
        )
    }
}

/// Connection settings, shaped by the source type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectionConfig {
    Database {
        host: Option<String>,
        port: Option<u16>,
        database: Option<String>,
        username: Option<String>,
        #[serde(default, skip_serializing)]
        password: Option<String>,
    },
    Api {
        endpoint: Option<String>,
        auth_type: Option<String>,
        #[serde(default, skip_serializing)]
        token: Option<String>,
    },
    File {
        file_type: Option<String>,
    },
}

impl ConnectionConfig {
    /// Whether every field needed to reach the source is present
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Database { host, port, database, .. } => {
                host.clean().is_some() && port.is_some() && database.clean().is_some()
            },
            Self::Api { endpoint, .. } => endpoint.clean().is_some(),
            Self::File { file_type } => file_type.clean().is_some(),
        }
    }

    /// One-line summary, e.g. `localhost:3306/mysql_db`
    pub fn summary(&self) -> String {
        match self {
            Self::Database { host, port, database, .. } => format!(
                "{}:{}/{}",
                host.trimmed(),
                port.map(|p| p.to_string()).unwrap_or_default(),
                database.trimmed()
            ),
            Self::Api { endpoint, .. } => endpoint.trimmed(),
            Self::File { file_type } => format!("{} file", file_type.trimmed()),
        }
    }

    /// Fill secrets omitted by an edit from the stored config of the same kind
    pub fn with_secrets_from(self, stored: &ConnectionConfig) -> Self {
        match (self, stored) {
            (
                Self::Database { host, port, database, username, password: None },
                Self::Database { password, .. },
            ) => Self::Database { host, port, database, username, password: password.clone() },
            (Self::Api { endpoint, auth_type, token: None }, Self::Api { token, .. }) => {
                Self::Api { endpoint, auth_type, token: token.clone() }
            },
            (config, _) => config,
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Database { host, port, database, username, password } => Self::Database {
                host: host.clean(),
                port,
                database: database.clean(),
                username: username.clean(),
                password,
            },
            Self::Api { endpoint, auth_type, token } => Self::Api {
                endpoint: endpoint.clean(),
                auth_type: auth_type.clean(),
                token: token.clean(),
            },
            Self::File { file_type } => Self::File { file_type: file_type.clean() },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataSource {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: DataSourceType,
    pub description: Option<String>,
    pub config: ConnectionConfig,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DataSourceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Data source name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: DataSourceType,
    pub description: Option<String>,
    /// Falls back to the type's default config when omitted
    pub config: Option<ConnectionConfig>,
}

impl DataSourceRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trimmed();
        self.description = self.description.clean();
        self.config = self.config.map(ConnectionConfig::normalized);
        self
    }

    /// Resolve the connection config, rejecting one shaped for another type
    pub fn resolve_config(&self) -> Option<ConnectionConfig> {
        match &self.config {
            Some(config) if self.source_type.accepts(config) => Some(config.clone()),
            Some(_) => None,
            None => Some(self.source_type.default_config()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DataSourceQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub source_type: Option<DataSourceType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DataSourceDetail {
    pub id: i64,
    pub name: String,
    pub type_label: String,
    pub status: ConnectionStatus,
    pub connection_info: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DataSource> for DataSourceDetail {
    fn from(ds: &DataSource) -> Self {
        Self {
            id: ds.id,
            name: ds.name.clone(),
            type_label: ds.source_type.label().to_string(),
            status: ds.status,
            connection_info: ds.config.summary(),
            description: ds.description.clone(),
            created_at: ds.created_at,
            updated_at: ds.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionTestResponse {
    pub id: i64,
    pub status: ConnectionStatus,
    pub connection_info: String,
    pub message: String,
}
