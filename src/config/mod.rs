use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

pub use config::ConfigError;

use crate::models::{Layout, LayoutError};
use crate::persistence::{SelectionCookie, SELECTION_COOKIE, SELECTION_TTL_SECS};
use crate::room::{RoomOptions, StaleIds, DEFAULT_ICON_SRC};

// Главная структура конфигурации
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub room: RoomConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Настройки зала и cookie
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    pub layout_path: Option<PathBuf>,
    pub cookie_name: String,
    pub cookie_ttl_secs: i64,
    pub cookie_path: String,
    pub icon_src: String,
    pub static_dir: Option<PathBuf>,
    pub prune_stale_ids: bool,
}

impl Config {
    /// Defaults, then optional `seats.{toml,json,yaml}`, then `SEATS__*`
    /// environment variables (`SEATS__APP__PORT=9000`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name("seats").required(false))
            .add_source(
                config::Environment::with_prefix("SEATS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "seat_picker=debug,tower_http=debug")?
            .set_default("app.log_format", "pretty")?
            .set_default("room.cookie_name", SELECTION_COOKIE)?
            .set_default("room.cookie_ttl_secs", SELECTION_TTL_SECS)?
            .set_default("room.cookie_path", "/")?
            .set_default("room.icon_src", DEFAULT_ICON_SRC)?
            .set_default("room.prune_stale_ids", true)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "seat_picker=debug,tower_http=debug".to_string(),
                log_format: LogFormat::Pretty,
            },
            room: RoomConfig {
                layout_path: None,
                cookie_name: SELECTION_COOKIE.to_string(),
                cookie_ttl_secs: SELECTION_TTL_SECS,
                cookie_path: "/".to_string(),
                icon_src: DEFAULT_ICON_SRC.to_string(),
                static_dir: None,
                prune_stale_ids: true,
            },
        }
    }
}

impl RoomConfig {
    pub fn room_options(&self) -> RoomOptions {
        RoomOptions {
            cookie: SelectionCookie::new(
                self.cookie_name.clone(),
                Duration::seconds(self.cookie_ttl_secs),
                self.cookie_path.clone(),
            ),
            icon_src: self.icon_src.clone(),
            stale_ids: if self.prune_stale_ids {
                StaleIds::Prune
            } else {
                StaleIds::Keep
            },
        }
    }

    // Без файла схемы используется демо-зал
    pub fn load_layout(&self) -> Result<Layout, LayoutError> {
        match &self.layout_path {
            Some(path) => Layout::load(path),
            None => Ok(Layout::demo()),
        }
    }
}
