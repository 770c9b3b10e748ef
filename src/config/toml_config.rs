use crate::core::matcher::{DEFAULT_TOLERANCE_MINUTES, MAX_RESULTS};
use crate::core::SettingsProvider;
use crate::utils::error::{MealError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CATALOG_PATH: &str = "./recipes.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_source")]
    pub source: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

fn default_source() -> String {
    "file".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            path: Some(DEFAULT_CATALOG_PATH.to_string()),
            endpoint: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_tolerance: Option<u32>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

/// 已驗證的目錄來源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File { path: String },
    Http { endpoint: String, timeout: Duration },
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MealError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MealError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RECIPE_API})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MealError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.catalog_source()?;

        if let Some(max_results) = self.search.max_results {
            validation::validate_range("search.max_results", max_results, 1, MAX_RESULTS)?;
        }

        Ok(())
    }

    pub fn catalog_source(&self) -> Result<CatalogSource> {
        match self.catalog.source.trim().to_ascii_lowercase().as_str() {
            "file" => {
                let path = validation::validate_required_field("catalog.path", &self.catalog.path)?;
                validation::validate_path("catalog.path", path)?;
                validation::validate_catalog_extension("catalog.path", path)?;
                Ok(CatalogSource::File { path: path.clone() })
            }
            "http" => {
                let endpoint =
                    validation::validate_required_field("catalog.endpoint", &self.catalog.endpoint)?;
                validation::validate_url("catalog.endpoint", endpoint)?;
                let timeout = self.catalog.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
                validation::validate_range("catalog.timeout_seconds", timeout, 1, 300)?;
                Ok(CatalogSource::Http {
                    endpoint: endpoint.clone(),
                    timeout: Duration::from_secs(timeout),
                })
            }
            other => Err(MealError::InvalidConfigValueError {
                field: "catalog.source".to_string(),
                value: other.to_string(),
                reason: "Unsupported source. Valid sources: file, http".to_string(),
            }),
        }
    }

    pub fn json_logging(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    /// 指定本機目錄檔，覆蓋設定檔中的來源
    pub fn use_file_catalog(&mut self, path: impl Into<String>) {
        self.catalog.source = "file".to_string();
        self.catalog.path = Some(path.into());
    }

    pub fn use_http_catalog(&mut self, endpoint: impl Into<String>) {
        self.catalog.source = "http".to_string();
        self.catalog.endpoint = Some(endpoint.into());
    }
}

impl SettingsProvider for TomlConfig {
    fn default_tolerance(&self) -> u32 {
        self.search.default_tolerance.unwrap_or(DEFAULT_TOLERANCE_MINUTES)
    }

    fn max_results(&self) -> usize {
        self.search.max_results.unwrap_or(MAX_RESULTS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = TomlConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.default_tolerance(), 10);
        assert_eq!(config.max_results(), 50);
        assert_eq!(
            config.catalog_source().unwrap(),
            CatalogSource::File {
                path: DEFAULT_CATALOG_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_parse_http_config() {
        let toml_content = r#"
[catalog]
source = "http"
endpoint = "https://recipes.example.com/api"
timeout_seconds = 3

[search]
default_tolerance = 15
max_results = 20

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.default_tolerance(), 15);
        assert_eq!(config.max_results(), 20);
        assert!(config.json_logging());
        assert_eq!(
            config.catalog_source().unwrap(),
            CatalogSource::Http {
                endpoint: "https://recipes.example.com/api".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEAL_MATCHER_TEST_ENDPOINT", "https://test.recipes.com");

        let toml_content = r#"
[catalog]
source = "http"
endpoint = "${MEAL_MATCHER_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.catalog.endpoint.as_deref(),
            Some("https://test.recipes.com")
        );

        std::env::remove_var("MEAL_MATCHER_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let missing_endpoint = TomlConfig::from_toml_str("[catalog]\nsource = \"http\"\n").unwrap();
        assert!(matches!(
            missing_endpoint.validate(),
            Err(MealError::MissingConfigError { .. })
        ));

        let bad_source = TomlConfig::from_toml_str("[catalog]\nsource = \"ftp\"\n").unwrap();
        assert!(bad_source.validate().is_err());

        let bad_extension =
            TomlConfig::from_toml_str("[catalog]\npath = \"recipes.txt\"\n").unwrap();
        assert!(bad_extension.validate().is_err());

        let too_many = TomlConfig::from_toml_str("[search]\nmax_results = 80\n").unwrap();
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_overrides_switch_source() {
        let mut config = TomlConfig::default();

        config.use_http_catalog("http://localhost:9000");
        assert!(matches!(
            config.catalog_source().unwrap(),
            CatalogSource::Http { .. }
        ));

        config.use_file_catalog("data/recipes.csv");
        assert_eq!(
            config.catalog_source().unwrap(),
            CatalogSource::File {
                path: "data/recipes.csv".to_string()
            }
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"./my-recipes.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.catalog.source, "file");
        assert_eq!(config.catalog.path.as_deref(), Some("./my-recipes.csv"));
    }
}
