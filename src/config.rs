use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::costing::{CostInputs, CostPolicy};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// 기본 이력 파일 이름.
pub const DEFAULT_STORE_PATH: &str = "cost_history.jsonl";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 접속 비밀번호. 비어 있으면 확인하지 않는다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
    /// 계산 이력 파일 경로
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// 관세/제안가 산정 방식
    #[serde(default)]
    pub policy: CostPolicy,
    /// 입력 양식 기본값과 원가 표 교체 설정
    #[serde(default)]
    pub baseline: CostInputs,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_password: None,
            store_path: default_store_path(),
            policy: CostPolicy::default(),
            baseline: CostInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
