//! 설정 관리.
//!
//! 이 모듈은 매매일지 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → 설정 파일(선택) → `JOURNAL__` 환경 변수 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::AccountSettings;

/// 거래 목록을 저장하는 기본 키.
pub const DEFAULT_TRADES_KEY: &str = "trading-journal-data";

/// 계좌 설정을 저장하는 기본 키.
pub const DEFAULT_SETTINGS_KEY: &str = "trading-journal-settings";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 저장된 설정이 없을 때 사용할 계좌 설정
    #[serde(default)]
    pub account: AccountSettings,
}

/// 키-값 저장소 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// 데이터 디렉토리
    pub data_dir: PathBuf,
    /// 거래 목록 키
    #[serde(default = "default_trades_key")]
    pub trades_key: String,
    /// 계좌 설정 키
    #[serde(default = "default_settings_key")]
    pub settings_key: String,
}

fn default_trades_key() -> String {
    DEFAULT_TRADES_KEY.to_string()
}
fn default_settings_key() -> String {
    DEFAULT_SETTINGS_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            trades_key: default_trades_key(),
            settings_key: default_settings_key(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 설정 빌더를 생성합니다. 파일은 존재하지 않아도 됩니다.
    fn builder(
        path: Option<&Path>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("storage.data_dir", "./data")?
            .set_default("storage.trades_key", DEFAULT_TRADES_KEY)?
            .set_default("storage.settings_key", DEFAULT_SETTINGS_KEY)?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        // 환경 변수로 오버라이드
        Ok(builder.add_source(
            config::Environment::with_prefix("JOURNAL")
                .separator("__")
                .try_parsing(true),
        ))
    }

    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::builder(Some(path.as_ref()))?.build()?.try_deserialize()
    }

    /// 기본 경로(`config/journal.toml`)에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/journal.toml")
    }

    /// 환경 변수만으로 설정을 로드합니다.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::builder(None)?.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.storage.trades_key, "trading-journal-data");
        assert_eq!(config.storage.settings_key, "trading-journal-settings");
        assert_eq!(config.account.initial_capital, dec!(10000));
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage.trades_key, DEFAULT_TRADES_KEY);
        assert_eq!(config.account, AccountSettings::default());
    }
}
