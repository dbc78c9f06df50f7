use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the moderation sidebar
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationSidebarConfig {
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Presentation settings for the sidebar info block
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresentationConfig {
    /// Revisions edited within this many days show a relative
    /// "X ago" timestamp instead of an absolute date
    pub recent_edit_window_days: i64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            recent_edit_window_days: 30,
        }
    }
}

impl Default for ModerationSidebarConfig {
    fn default() -> Self {
        Self {
            observability: ObservabilityConfig::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

impl ModerationSidebarConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (moderation-sidebar.toml)
    /// 3. Environment variables (prefixed with MODERATION_SIDEBAR_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("observability.tracing_enabled", true)?
            .set_default("observability.log_level", "info")?
            .set_default("presentation.recent_edit_window_days", 30i64)?;

        if Path::new("moderation-sidebar.toml").exists() {
            builder = builder.add_source(File::with_name("moderation-sidebar"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MODERATION_SIDEBAR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let sidebar_config: ModerationSidebarConfig = config.try_deserialize()?;

        Ok(sidebar_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<ModerationSidebarConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = ModerationSidebarConfig::load_env_file();
        ModerationSidebarConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static ModerationSidebarConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
