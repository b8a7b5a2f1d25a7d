// src/config.rs
//! Widget configuration, loaded from YAML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, WidgetError};
use crate::widget::settings::Settings;

/// How a submission that arrives while a reply is still pending is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Replies are answered one at a time, in submission order.
    #[default]
    Queue,
    /// A new submission cancels the pending turn.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub name: String,
    pub handle: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            handle: "@guest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub user: UserConfig,
    pub reply_delay_ms: u64,
    pub typing_delay_ms: u64,
    pub overlap: OverlapPolicy,
    pub notice_ms: u64,
    pub settings: Settings,
    pub log_dir: String,
    pub debug: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            user: UserConfig::default(),
            reply_delay_ms: 1000,
            typing_delay_ms: 1500,
            overlap: OverlapPolicy::Queue,
            notice_ms: 3000,
            settings: Settings::default(),
            log_dir: "./logs".to_string(),
            debug: false,
        }
    }
}

impl WidgetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WidgetConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`WidgetConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.user.name.trim().is_empty() {
            return Err(WidgetError::Config("user.name must not be empty".to_string()));
        }
        if self.notice_ms == 0 {
            return Err("notice_ms must be greater than zero".into());
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}
