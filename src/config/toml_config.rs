use crate::core::ConfigProvider;
use crate::domain::model::Strategy;
use crate::utils::error::{Result, TaggerError};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// ${VAR_NAME}
static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub data_path: PathBuf,
    pub template_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// "compact" 或 "json"
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TaggerError::InputNotFound {
                path: path.display().to_string(),
            },
            _ => TaggerError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TaggerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|format| format == "json")
            .unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.data_path", &self.input.data_path)?;
        validate_path("input.template_path", &self.input.template_path)?;
        validate_path("output.path", &self.output.path)?;

        if let Some(format) = self
            .monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
        {
            validate_one_of("monitoring.log_format", format, &["compact", "json"])?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &Path {
        &self.input.data_path
    }

    fn template_path(&self) -> &Path {
        &self.input.template_path
    }

    fn output_path(&self) -> &Path {
        &self.output.path
    }

    fn strategy(&self) -> Strategy {
        self.classify.strategy
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
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[input]
data_path = "data.csv"
template_path = "template.json"

[output]
path = "output/output.json"

[classify]
strategy = "parallel"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_path(), Path::new("data.csv"));
        assert_eq!(config.output_path(), Path::new("output/output.json"));
        assert_eq!(config.strategy(), Strategy::Parallel);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_defaults_to_sequential() {
        let toml_content = r#"
[input]
data_path = "data.csv"
template_path = "template.json"

[output]
path = "out.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.strategy(), Strategy::Sequential);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let toml_content = r#"
[input]
data_path = "data.csv"
template_path = "template.json"

[output]
path = "out.json"

[classify]
strategy = "random"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, TaggerError::ConfigError { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("USER_TAGGER_TEST_DATA_DIR", "/srv/input");

        let toml_content = r#"
[input]
data_path = "${USER_TAGGER_TEST_DATA_DIR}/data.csv"
template_path = "${USER_TAGGER_TEST_UNSET}/template.json"

[output]
path = "out.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_path(), Path::new("/srv/input/data.csv"));
        assert_eq!(
            config.template_path(),
            Path::new("${USER_TAGGER_TEST_UNSET}/template.json")
        );

        std::env::remove_var("USER_TAGGER_TEST_DATA_DIR");
    }

    #[test]
    fn test_invalid_log_format() {
        let toml_content = r#"
[input]
data_path = "data.csv"
template_path = "template.json"

[output]
path = "out.json"

[monitoring]
enabled = true
log_format = "xml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[input]
data_path = "data.csv"
template_path = "template.json"

[output]
path = "out.json"

[monitoring]
enabled = false
log_format = "json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.json_logs());
    }
}
