use crate::application::analysis_service::AnalysisOptions;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;

const ENV_PREFIX: &str = "ANALYZER";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub streaming: StreamingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisSettings {
    /// Offset applied to wall-clock times in phase summaries.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StreamingSettings {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_channel_capacity() -> usize {
    32
}

impl AppConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .with_context(|| format!("invalid listen address {}", addr))
    }

    pub fn analysis_options(&self) -> anyhow::Result<AnalysisOptions> {
        let minutes = self.analysis.utc_offset_minutes;
        AnalysisOptions::with_offset_minutes(minutes)
            .with_context(|| format!("utc offset of {} minutes is out of range", minutes))
    }
}

/// Optional `config/server` file, overridden by `ANALYZER__SECTION__KEY` variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
