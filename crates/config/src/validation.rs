use std::net::SocketAddr;

use crate::{ConfigError, ConfigResult};

/// Trait for configuration validation
pub trait ConfigValidator {
    fn validate(&self) -> ConfigResult<()>;
}

pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field_name: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field_name} cannot be empty"
            )));
        }
        Ok(())
    }

    /// Validate that a timeout is reasonable
    pub fn validate_timeout_seconds(timeout_seconds: u64, field_name: &str) -> ConfigResult<()> {
        if timeout_seconds == 0 {
            return Err(ConfigError::Validation(format!(
                "{field_name} must be greater than 0"
            )));
        }
        if timeout_seconds > 3600 {
            return Err(ConfigError::Validation(format!(
                "{field_name} must be less than or equal to 3600"
            )));
        }
        Ok(())
    }

    /// Validate a `host:port` listen address
    pub fn validate_socket_addr(value: &str, field_name: &str) -> ConfigResult<SocketAddr> {
        Self::validate_not_empty(value, field_name)?;
        let addr: SocketAddr = value.parse().map_err(|e| {
            ConfigError::Validation(format!("{field_name} is not a valid address '{value}': {e}"))
        })?;
        if addr.port() == 0 {
            return Err(ConfigError::Validation(format!(
                "{field_name} port cannot be 0"
            )));
        }
        Ok(addr)
    }
}
