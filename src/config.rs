use crate::catalog::{Backoff, RetryPolicy};
use crate::error::{Result, VerifyError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const API_TOKEN_ENV: &str = "FLIX360_API_TOKEN";

/// バックオフ方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub max_attempts: u32,
    pub backoff: BackoffKind,
    pub backoff_base_ms: u64,
    pub navigation_timeout_secs: u64,
    pub run_timeout_secs: u64,
    pub input_sheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://flix360.io/api/v1/products".into(),
            api_token: None,
            max_attempts: 3,
            backoff: BackoffKind::Linear,
            backoff_base_ms: 1000,
            navigation_timeout_secs: 60,
            run_timeout_secs: 1800,
            input_sheet: "Sheet1".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VerifyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("mpn-verify").join("config.json"))
    }

    pub fn get_api_token(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }

        self.api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(VerifyError::MissingApiToken)
    }

    pub fn set_api_token(&mut self, token: String) -> Result<()> {
        self.api_token = Some(token);
        self.save()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let base = Duration::from_millis(self.backoff_base_ms);
        let backoff = match self.backoff {
            BackoffKind::Linear => Backoff::Linear(base),
            BackoffKind::Exponential => Backoff::Exponential(base),
        };
        RetryPolicy::new(self.max_attempts, backoff)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}
