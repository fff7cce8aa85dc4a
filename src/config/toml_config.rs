use crate::core::price_pipeline::DEFAULT_TIMEOUT;
use crate::domain::model::{DeviceCatalog, DeviceTypeEntry};
use crate::utils::error::{PricerError, Result};
use crate::utils::validation::{validate_timeout, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/calculator/calculate/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricerConfig {
    pub calculator: CalculatorConfig,
    pub session: Option<SessionConfig>,
    /// 未設定時使用內建對照表
    pub catalog: Option<HashMap<String, DeviceTypeEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 與 `document.cookie` 相同格式，例如 `csrftoken=abc; sessionid=xyz`
    pub cookies: Option<String>,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            calculator: CalculatorConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout_seconds: None,
            },
            session: None,
            catalog: None,
        }
    }
}

impl PricerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| PricerError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${CSRF_COOKIE})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| PricerError::config(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("calculator.endpoint", &self.calculator.endpoint)?;
        validate_timeout("calculator.timeout_seconds", self.timeout())?;
        if let Some(entries) = &self.catalog {
            if entries.is_empty() {
                return Err(PricerError::config("catalog is defined but has no device types"));
            }
        }
        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        &self.calculator.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.calculator
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn cookies(&self) -> &str {
        self.session
            .as_ref()
            .and_then(|s| s.cookies.as_deref())
            .unwrap_or("")
    }

    /// 建立對照表；設定檔中的對照表會先經過驗證
    pub fn catalog(&self) -> Result<DeviceCatalog> {
        match &self.catalog {
            Some(entries) => DeviceCatalog::from_entries(
                entries
                    .iter()
                    .map(|(name, entry)| (name.as_str(), entry.clone())),
            ),
            None => Ok(DeviceCatalog::builtin()),
        }
    }
}

impl Validate for PricerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()?;
        self.catalog().map(|_| ())
    }
}
