use crate::application::translations::TranslationTable;
use anyhow::Context;
use chrono::{TimeDelta, Utc};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
    pub dashboard: DashboardSettings,
    pub auth: AuthSettings,
    pub client: ClientSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub period_secs: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub load_delay_ms: u64,
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
    pub role: String,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub token_dir: PathBuf,
}

impl AppConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh.period_secs)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.dashboard.load_delay_ms)
    }

    /// Token lifetime. Fails unless a token issued now would have a
    /// representable expiry.
    pub fn token_ttl(&self) -> anyhow::Result<TimeDelta> {
        let minutes = self.auth.token_ttl_minutes;
        if minutes <= 0 {
            anyhow::bail!("auth.token_ttl_minutes must be greater than zero");
        }
        TimeDelta::try_minutes(minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .with_context(|| format!("auth.token_ttl_minutes {} is out of range", minutes))
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.refresh.period_secs == 0 {
            anyhow::bail!("refresh.period_secs must be greater than zero");
        }
        self.token_ttl()?;
        if !TranslationTable::is_supported(&self.dashboard.language) {
            anyhow::bail!("dashboard.language {:?} is not supported", self.dashboard.language);
        }
        Ok(self)
    }
}

fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("server.log_level", "info")?
        .set_default("refresh.period_secs", 30)?
        .set_default("dashboard.load_delay_ms", 100)?
        .set_default("dashboard.language", "en")?
        .set_default("auth.username", "demo")?
        .set_default("auth.password", "demo123")?
        .set_default("auth.role", "admin")?
        .set_default("auth.token_ttl_minutes", 30)?
        .set_default("client.base_url", "http://127.0.0.1:8080")?
        .set_default("client.token_dir", ".smartswap")?)
}

/// Defaults, then `config/server.toml` if present, then `SMARTSWAP__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = defaults()?
        .add_source(File::with_name("config/server").required(false))
        .add_source(Environment::with_prefix("SMARTSWAP").separator("__"))
        .build()
        .context("Failed to load configuration")?;

    settings.try_deserialize::<AppConfig>()?.validate()
}

/// Defaults overlaid with a TOML document.
#[cfg(test)]
pub fn parse_app_config(toml: &str) -> anyhow::Result<AppConfig> {
    let settings = defaults()?
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()
        .context("Failed to parse configuration")?;

    settings.try_deserialize::<AppConfig>()?.validate()
}
