use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Static catalog source
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file replacing the embedded catalog
    pub path: Option<String>,
}

/// Sample fixtures loaded into the stores at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    /// JSON file replacing the embedded fixtures
    pub path: Option<String>,
}

/// Command line arguments for configuration overrides
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bi-studio")]
#[command(version, about = "BI Studio - data source, metric, dimension and report configuration")]
pub struct CommandLineArgs {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Server host (overrides config file)
    #[arg(long, value_name = "HOST")]
    pub server_host: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Logging level (overrides config file, e.g., "info,bi_studio=debug")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Catalog JSON file (overrides config file)
    #[arg(long, value_name = "PATH")]
    pub catalog_path: Option<String>,

    /// Load sample fixtures at startup (overrides config file)
    #[arg(long, value_name = "BOOL")]
    pub seed_enabled: Option<bool>,

    /// Seed fixtures JSON file (overrides config file)
    #[arg(long, value_name = "PATH")]
    pub seed_path: Option<String>,
}

impl Config {
    /// Load configuration with command line, environment variable, and file support
    ///
    /// Loading order (priority from highest to lowest):
    /// 1. Command line arguments
    /// 2. Environment variables (prefixed with APP_, `.env` is honoured)
    /// 3. Configuration file (config.toml)
    /// 4. Default values
    pub fn load() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let cli_args = CommandLineArgs::parse();

        // 1. Load from config file (use CLI --config if provided, otherwise find default)
        let config_path = cli_args.config.clone().or_else(Self::find_config_file);
        let mut config = if let Some(config_path) = config_path {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Override with command line arguments (highest priority)
        config.apply_cli_overrides(&cli_args);

        // 4. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,bi_studio=debug")
    /// - APP_CATALOG_PATH: Catalog JSON file
    /// - APP_SEED_ENABLED: Load sample fixtures (true/false)
    /// - APP_SEED_PATH: Seed fixtures JSON file
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(path) = std::env::var("APP_CATALOG_PATH") {
            tracing::info!("Override catalog.path from env: {}", path);
            self.catalog.path = Some(path);
        }

        if let Ok(enabled) = std::env::var("APP_SEED_ENABLED") {
            match enabled.parse() {
                Ok(val) => {
                    self.seed.enabled = val;
                    tracing::info!("Override seed.enabled from env: {}", self.seed.enabled);
                },
                Err(_) => tracing::warn!(
                    "Invalid APP_SEED_ENABLED '{}' (keep {})",
                    enabled,
                    self.seed.enabled
                ),
            }
        }

        if let Ok(path) = std::env::var("APP_SEED_PATH") {
            tracing::info!("Override seed.path from env: {}", path);
            self.seed.path = Some(path);
        }
    }

    /// Apply command line argument overrides (highest priority)
    fn apply_cli_overrides(&mut self, args: &CommandLineArgs) {
        if let Some(host) = &args.server_host {
            self.server.host = host.clone();
            tracing::info!("Override server.host from CLI: {}", self.server.host);
        }

        if let Some(port) = args.server_port {
            self.server.port = port;
            tracing::info!("Override server.port from CLI: {}", self.server.port);
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
            tracing::info!("Override logging.level from CLI: {}", self.logging.level);
        }

        if let Some(path) = &args.catalog_path {
            self.catalog.path = Some(path.clone());
            tracing::info!("Override catalog.path from CLI: {}", path);
        }

        if let Some(enabled) = args.seed_enabled {
            self.seed.enabled = enabled;
            tracing::info!("Override seed.enabled from CLI: {}", self.seed.enabled);
        }

        if let Some(path) = &args.seed_path {
            self.seed.path = Some(path.clone());
            tracing::info!("Override seed.path from CLI: {}", path);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        if let Some(path) = &self.catalog.path
            && !Path::new(path).exists()
        {
            anyhow::bail!("Catalog file not found: {}", path);
        }

        if self.seed.enabled
            && let Some(path) = &self.seed.path
            && !Path::new(path).exists()
        {
            anyhow::bail!("Seed file not found: {}", path);
        }

        Ok(())
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(PathBuf::from)
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed.path.as_ref().map(PathBuf::from)
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,bi_studio=debug".to_string(),
            file: Some("logs/bi-studio.log".to_string()),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true, path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::parse("[server]\nport = 9090\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert!(config.seed.enabled);
        assert!(config.catalog.path.is_none());
        assert_eq!(config.logging.level, "info,bi_studio=debug");
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = Config::parse("[seed]\nenabled = true\n").unwrap();
        let args = CommandLineArgs::parse_from([
            "bi-studio",
            "--server-port",
            "9000",
            "--seed-enabled",
            "false",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.server.port, 9000);
        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = Config::parse("[server]\nport = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_catalog_file() {
        let config = Config::parse("[catalog]\npath = \"/nonexistent/catalog.json\"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
