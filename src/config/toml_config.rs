use crate::config::{validate_catalog_path, CatalogConfig, RestCatalogConfig, DEFAULT_TIMEOUT_SECONDS};
use crate::core::matcher::MatchOptions;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PosError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: Option<StoreConfig>,
    /// Only the catalog commands need this section.
    pub catalog: Option<CatalogSection>,
    pub matcher: Option<MatchOptions>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    /// `file` or `rest`
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PosError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PosError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            self.validate_catalog(catalog)?;
        }

        if let Some(matcher) = &self.matcher {
            validate_range("matcher.loose_min_len", matcher.loose_min_len, 1, 32)?;
            validate_range("matcher.suffix_min_len", matcher.suffix_min_len, 2, 32)?;
            validate_range("matcher.prefix_fallback_len", matcher.prefix_fallback_len, 1, 32)?;
            validate_range("matcher.substitution_min_len", matcher.substitution_min_len, 2, 32)?;
        }

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(PosError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }

    fn validate_catalog(&self, catalog: &CatalogSection) -> Result<()> {
        match catalog.r#type.as_str() {
            "file" => {
                let path = validate_required_field("catalog.path", &catalog.path)?;
                validate_catalog_path("catalog.path", path)
            }
            "rest" => {
                let endpoint = validate_required_field("catalog.endpoint", &catalog.endpoint)?;
                validate_url("catalog.endpoint", endpoint)?;
                let api_key = validate_required_field("catalog.api_key", &catalog.api_key)?;
                validate_non_empty_string("catalog.api_key", api_key)?;
                let store = validate_required_field("store", &self.store)?;
                validate_non_empty_string("store.id", &store.id)?;
                if let Some(timeout) = catalog.timeout_seconds {
                    validate_range("catalog.timeout_seconds", timeout, 1, 300)?;
                }
                Ok(())
            }
            other => Err(PosError::InvalidConfigValueError {
                field: "catalog.type".to_string(),
                value: other.to_string(),
                reason: "Supported catalog types: file, rest".to_string(),
            }),
        }
    }

    pub fn store_name(&self) -> Option<&str> {
        self.store.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_config(&self) -> Result<CatalogConfig> {
        let catalog = validate_required_field("catalog", &self.catalog)?;
        match catalog.r#type.as_str() {
            "rest" => {
                let store = validate_required_field("store", &self.store)?;
                Ok(CatalogConfig::Rest(RestCatalogConfig {
                    endpoint: validate_required_field("catalog.endpoint", &catalog.endpoint)?.clone(),
                    api_key: validate_required_field("catalog.api_key", &catalog.api_key)?.clone(),
                    store_id: store.id.clone(),
                    timeout: Duration::from_secs(catalog.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
                }))
            }
            _ => Ok(CatalogConfig::File {
                path: validate_required_field("catalog.path", &catalog.path)?.clone(),
            }),
        }
    }

    fn match_options(&self) -> MatchOptions {
        self.matcher.unwrap_or_default()
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
    fn test_parse_file_catalog_config() {
        let toml_content = r#"
[store]
id = "carniceria-don-jose"
name = "Carnicería Don José"

[catalog]
type = "file"
path = "productos.csv"

[matcher]
prefix_fallback_len = 4
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.store_name(), Some("Carnicería Don José"));
        assert_eq!(
            config.catalog_config().unwrap(),
            CatalogConfig::File {
                path: "productos.csv".to_string()
            }
        );

        let options = config.match_options();
        assert_eq!(options.prefix_fallback_len, 4);
        assert_eq!(options.loose_min_len, 3);
    }

    #[test]
    fn test_rest_catalog_with_env_substitution() {
        std::env::set_var("NORDIA_TEST_API_KEY", "secret-key");

        let toml_content = r#"
[store]
id = "store-1"

[catalog]
type = "rest"
endpoint = "https://abc.supabase.co"
api_key = "${NORDIA_TEST_API_KEY}"
timeout_seconds = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        match config.catalog_config().unwrap() {
            CatalogConfig::Rest(rest) => {
                assert_eq!(rest.api_key, "secret-key");
                assert_eq!(rest.store_id, "store-1");
                assert_eq!(rest.timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected catalog config: {:?}", other),
        }

        std::env::remove_var("NORDIA_TEST_API_KEY");
    }

    #[test]
    fn test_rest_catalog_requires_store() {
        let toml_content = r#"
[catalog]
type = "rest"
endpoint = "https://abc.supabase.co"
api_key = "key"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PosError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let bad_type = TomlConfig::from_toml_str("[catalog]\ntype = \"ftp\"\n").unwrap();
        assert!(bad_type.validate().is_err());

        let bad_ext = TomlConfig::from_toml_str("[catalog]\ntype = \"file\"\npath = \"plu.txt\"\n").unwrap();
        assert!(bad_ext.validate().is_err());

        let bad_level = TomlConfig::from_toml_str(
            "[catalog]\ntype = \"file\"\npath = \"p.csv\"\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();
        assert!(bad_level.validate().is_err());

        let bad_matcher = TomlConfig::from_toml_str(
            "[catalog]\ntype = \"file\"\npath = \"p.csv\"\n[matcher]\nloose_min_len = 0\n",
        )
        .unwrap();
        assert!(bad_matcher.validate().is_err());
    }

    #[test]
    fn test_config_without_catalog_section() {
        let toml_content = r#"
[matcher]
substitution_min_len = 5

[logging]
level = "warn"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_options().substitution_min_len, 5);
        assert!(matches!(
            config.catalog_config(),
            Err(PosError::MissingConfigError { field }) if field == "catalog"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[catalog"),
            Err(PosError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[catalog]
type = "file"
path = "productos.json"

[logging]
level = "debug"
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }
}
