use crate::config::ByeStrategy;
use crate::utils::error::{BuddyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub announcement: AnnouncementConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawConfig {
    pub organizer: Option<String>,
    pub bye_policy: Option<ByeStrategy>,
    pub max_attempts: Option<u32>,
    pub redraw_on_unmatched: Option<bool>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementConfig {
    pub greeting: Option<String>,
    pub reminder: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| BuddyError::UnreadableFile {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BuddyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ORGANIZER})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BuddyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(organizer) = &self.draw.organizer {
            validate_non_empty_string("draw.organizer", organizer)?;
        }
        if let Some(max_attempts) = self.draw.max_attempts {
            validate_range("draw.max_attempts", max_attempts, 1, 10)?;
        }
        if let Some(path) = &self.history.path {
            validate_path("history.path", path)?;
        }
        Ok(())
    }
}
