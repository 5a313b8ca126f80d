use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: EnvironmentConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_environment_name")]
    pub environment_name: String,
    #[serde(default)]
    pub production: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Shown to the user when a request to the API fails.
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_environment_name() -> String {
    "dev".to_string()
}

fn default_api_url() -> String {
    "http://localhost:3000/exam/v1".to_string()
}

fn default_error_message() -> String {
    "Erro em nossos servidores, por favor, contate o suporte.".to_string()
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment_name: default_environment_name(),
            production: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            error_message: default_error_message(),
        }
    }
}

impl AppConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Loads `path` when given, otherwise the built-in development defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn api_url(&self) -> &str {
        &self.api.url
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("app.environment_name", &self.app.environment_name)?;
        validate_url("api.url", &self.api.url)?;
        validate_non_empty_string("api.error_message", &self.api.error_message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.app.environment_name, "dev");
        assert!(!config.app.production);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[app]
environment_name = "prod"
production = true

[api]
url = "https://api.example.com/exam/v1"
error_message = "Tente novamente."
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app.environment_name, "prod");
        assert!(config.app.production);
        assert_eq!(config.api_url(), "https://api.example.com/exam/v1");
        assert_eq!(config.api.error_message, "Tente novamente.");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PERSON_ADMIN_TEST_API_URL", "https://test.api.com");

        let config = AppConfig::from_toml_str(
            r#"
[api]
url = "${PERSON_ADMIN_TEST_API_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.url, "https://test.api.com");

        std::env::remove_var("PERSON_ADMIN_TEST_API_URL");
    }

    #[test]
    fn test_unset_env_var_is_kept_and_fails_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[api]
url = "${PERSON_ADMIN_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.url, "${PERSON_ADMIN_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(AppConfig::from_toml_str("[api\nurl = 1").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[app]\nenvironment_name = \"staging\"\n")
            .unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.app.environment_name, "staging");
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
