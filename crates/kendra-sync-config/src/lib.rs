// kendra-sync-config - typed configuration for the sync trigger and the stack
//
// Runtime configuration comes from the environment only:
// 1. Resource identifiers (INDEX_ID, DS_ID) - required, set by the stack
// 2. KENDRA_SYNC_* tuning knobs - optional
// 3. Platform defaults (lowest priority)
//
// Stack parameters for provisioning are read from TOML files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod env;
mod error;
mod platform;
mod sources;
mod stack;
mod validation;

pub use env::{EnvSource, Layered, MapEnvSource, StdEnvSource};
pub use error::{ConfigError, Result};
pub use platform::{Platform, PlatformDefaults};
pub use stack::{
    Connector, GoogleDriveConnector, KendraEdition, ModelId, SharePointConnector,
    SharePointVersion, StackParameters,
};
pub use validation::{parse_s3_uri, validate_stack_name};

/// Configuration of the sync-trigger function, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    pub index_id: String,
    pub data_source_id: String,
    /// Accepted but unused by the handler; the SDK resolves its own region.
    pub region: Option<String>,
    pub completion: CompletionMode,
    pub logging: LogConfig,
}

/// Whether the handler reports back to CloudFormation after starting a sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionMode {
    /// Signal only when the event is a CloudFormation custom-resource request
    #[default]
    Auto,
    /// Always signal; non custom-resource events are rejected
    CfnResponse,
    /// Never signal
    None,
}

impl fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionMode::Auto => write!(f, "auto"),
            CompletionMode::CfnResponse => write!(f, "cfn-response"),
            CompletionMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for CompletionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(CompletionMode::Auto),
            "cfn-response" | "cfn_response" | "cfn" => Ok(CompletionMode::CfnResponse),
            "none" | "silent" => Ok(CompletionMode::None),
            _ => Err(ConfigError::invalid_value(
                &format!("{}{}", env::ENV_PREFIX, env::COMPLETION_MODE),
                s,
                "auto, cfn-response, or none",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "info" or "info,kendra_sync_lambda=debug"
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn for_platform(platform: Platform) -> Self {
        let defaults = platform.defaults();
        Self {
            level: defaults.log_level.to_string(),
            format: defaults.log_format,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::for_platform(Platform::Local)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_value(
                &format!("{}{}", env::ENV_PREFIX, env::LOG_FORMAT),
                s,
                "text or json",
            )),
        }
    }
}

impl SyncConfig {
    /// Load from the process environment for the detected platform
    pub fn load() -> Result<Self> {
        let platform = Platform::detect();
        sources::load_sync_config(&StdEnvSource, platform)
    }

    /// Load from an arbitrary source (tests, CLI flag overlays)
    pub fn from_source<E: EnvSource>(env: &E, platform: Platform) -> Result<Self> {
        sources::load_sync_config(env, platform)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_sync_config(self)
    }
}

impl StackParameters {
    /// Load stack parameters from a TOML file and validate them
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let params = sources::load_stack_parameters(path.as_ref())?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_stack_parameters(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_mode_from_str() {
        assert_eq!("auto".parse::<CompletionMode>().unwrap(), CompletionMode::Auto);
        assert_eq!(
            "cfn-response".parse::<CompletionMode>().unwrap(),
            CompletionMode::CfnResponse
        );
        assert_eq!("CFN".parse::<CompletionMode>().unwrap(), CompletionMode::CfnResponse);
        assert_eq!("silent".parse::<CompletionMode>().unwrap(), CompletionMode::None);

        let err = "sometimes".parse::<CompletionMode>().unwrap_err();
        assert_eq!(err.key(), Some("KENDRA_SYNC_COMPLETION_MODE"));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn completion_mode_display_round_trips() {
        for mode in [
            CompletionMode::Auto,
            CompletionMode::CfnResponse,
            CompletionMode::None,
        ] {
            assert_eq!(mode.to_string().parse::<CompletionMode>().unwrap(), mode);
        }
    }
}
