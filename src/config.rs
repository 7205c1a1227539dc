use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";
/// 분석 서버 주소를 덮어쓰는 환경 변수.
pub const API_BASE_ENV: &str = "WHR_API_BASE";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 분석 서비스 주소. `/analyze`, `/report`, `/chat` 앞에 붙는다.
    pub api_base_url: String,
    /// auto / ko / en
    pub language: String,
    /// 언어팩(TOML) 디렉터리. 없으면 내장 문자열만 쓴다.
    pub locale_dir: Option<String>,
    /// 숫자 표시 형식. auto / en-US / de-DE
    pub number_locale: String,
    pub currency_symbol: String,
    /// 파일 세션 저장소 위치
    pub session_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            language: "auto".to_string(),
            locale_dir: None,
            number_locale: "auto".to_string(),
            currency_symbol: "₹".to_string(),
            session_dir: PathBuf::from(".whr_session"),
            request_timeout_secs: 30,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 만들어 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_to(self, path)
    }

    /// `WHR_API_BASE` 환경 변수가 있으면 서버 주소를 덮어쓴다.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_BASE_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("api_base_url = \"https://example.test\"\n").unwrap();
        assert_eq!(cfg.api_base_url, "https://example.test");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.session_dir, PathBuf::from(".whr_session"));
    }

    #[test]
    fn default_survives_toml_roundtrip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
