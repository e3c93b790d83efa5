use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{api::ApiConfig, logging::LogConfig};
use crate::validation::ConfigValidator;
use crate::{ConfigError, ConfigResult};

/// 未指定配置文件时依次查找的路径
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config/elevator.toml", "elevator.toml"];

/// 环境变量前缀，例如 `ELEVATOR_API__BIND_ADDRESS`
pub const ENV_PREFIX: &str = "ELEVATOR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> ConfigResult<Self> {
        let defaults = Self::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("api.bind_address", defaults.api.bind_address)?
            .set_default("api.cors_enabled", defaults.api.cors_enabled)?
            .set_default(
                "api.request_timeout_seconds",
                defaults.api.request_timeout_seconds,
            )?
            .set_default("log.level", defaults.log.level.to_string())?
            .set_default("log.format", defaults.log.format.to_string())?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(ConfigError::File(format!("配置文件不存在: {}", path)));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else if let Some(path) = DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
        {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: AppConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        self.api.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogLevel, OutputFormat};
    use std::io::Write;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api.bind_address, "0.0.0.0:8080");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_from_toml() {
        let toml_str = r#"
[api]
bind_address = "127.0.0.1:9000"
cors_enabled = false
request_timeout_seconds = 10

[log]
level = "debug"
format = "json"
"#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.api.bind_address, "127.0.0.1:9000");
        assert!(!config.api.cors_enabled);
        assert_eq!(config.api.request_timeout_seconds, 10);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, OutputFormat::Json);
    }

    #[test]
    fn test_app_config_from_toml_rejects_invalid_values() {
        let toml_str = r#"
[api]
bind_address = "127.0.0.1:9000"
cors_enabled = true
request_timeout_seconds = 0

[log]
level = "info"
format = "pretty"
"#;
        assert!(matches!(
            AppConfig::from_toml(toml_str),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_app_config_from_toml_reports_parse_error() {
        let result = AppConfig::from_toml("[api
bind_address = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_app_config_toml_output_is_loadable() {
        let config = AppConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("bind_address"));

        let parsed = AppConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.api.bind_address, config.api.bind_address);
    }

    #[test]
    fn test_load_from_file_fills_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbind_address = \"127.0.0.1:7070\"").unwrap();

        let config = AppConfig::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.api.bind_address, "127.0.0.1:7070");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.log.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AppConfig::load(Some("/definitely/not/here/elevator.toml"));
        match result {
            Err(ConfigError::File(msg)) => assert!(msg.contains("配置文件不存在")),
            other => panic!("Expected ConfigError::File, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbind_address = \"nowhere\"").unwrap();

        assert!(matches!(
            AppConfig::load(Some(file.path().to_str().unwrap())),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_reports_malformed_file_as_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api
bind_address = ").unwrap();

        assert!(matches!(
            AppConfig::load(Some(file.path().to_str().unwrap())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_reports_wrongly_typed_value_as_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]
request_timeout_seconds = \"soon\"").unwrap();

        assert!(matches!(
            AppConfig::load(Some(file.path().to_str().unwrap())),
            Err(ConfigError::Configuration(_))
        ));
    }
}
