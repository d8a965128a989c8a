// Configuration source loading
//
// SyncConfig: environment only, resolved over platform defaults.
// StackParameters: TOML file.

use crate::env::{self, EnvSource};
use crate::*;
use std::path::Path;

pub(crate) fn load_sync_config<E: EnvSource>(env: &E, platform: Platform) -> Result<SyncConfig> {
    // Identifiers are checked in the order the outbound call uses them
    let data_source_id = required(env, env::DATA_SOURCE_ID)?;
    let index_id = required(env, env::INDEX_ID)?;

    let region = env
        .get_raw(env::AWS_REGION)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let completion = match optional(env, env::COMPLETION_MODE) {
        Some(raw) => raw.parse::<CompletionMode>()?,
        None => CompletionMode::default(),
    };

    let mut logging = LogConfig::for_platform(platform);
    if let Some(level) = optional(env, env::LOG_LEVEL) {
        logging.level = level;
    }
    if let Some(format) = optional(env, env::LOG_FORMAT) {
        logging.format = format.parse::<LogFormat>()?;
    }

    let config = SyncConfig {
        index_id,
        data_source_id,
        region,
        completion,
        logging,
    };
    config.validate()?;
    Ok(config)
}

fn required<E: EnvSource>(env: &E, key: &str) -> Result<String> {
    let value = env.get_raw(key).ok_or_else(|| ConfigError::missing(key))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::empty(key));
    }
    Ok(trimmed.to_string())
}

fn optional<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn load_stack_parameters(path: &Path) -> Result<StackParameters> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_env() -> MapEnvSource {
        MapEnvSource::from_pairs(&[("INDEX_ID", "idx-123"), ("DS_ID", "ds-456")])
    }

    #[test]
    fn loads_identifiers_and_defaults() {
        let config = load_sync_config(&base_env(), Platform::Local).unwrap();
        assert_eq!(config.index_id, "idx-123");
        assert_eq!(config.data_source_id, "ds-456");
        assert_eq!(config.region, None);
        assert_eq!(config.completion, CompletionMode::Auto);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn missing_data_source_id_names_the_key() {
        let env = MapEnvSource::from_pairs(&[("INDEX_ID", "idx-123")]);
        let err = load_sync_config(&env, Platform::Lambda).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "DS_ID"));
        assert!(err.to_string().contains("DS_ID"));
    }

    #[test]
    fn missing_index_id_names_the_key() {
        let env = MapEnvSource::from_pairs(&[("DS_ID", "ds-456")]);
        let err = load_sync_config(&env, Platform::Lambda).unwrap_err();
        assert_eq!(err.key(), Some("INDEX_ID"));
    }

    #[test]
    fn blank_identifier_is_rejected() {
        let env = MapEnvSource::from_pairs(&[("INDEX_ID", "   "), ("DS_ID", "ds-456")]);
        let err = load_sync_config(&env, Platform::Local).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { ref key } if key == "INDEX_ID"));
    }

    #[test]
    fn region_is_accepted_but_optional() {
        let mut env = base_env();
        env.set("AWS_REGION", "eu-west-1");
        let config = load_sync_config(&env, Platform::Lambda).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn prefixed_overrides_apply() {
        let mut env = base_env();
        env.set("KENDRA_SYNC_COMPLETION_MODE", "none")
            .set("KENDRA_SYNC_LOG_LEVEL", "debug")
            .set("KENDRA_SYNC_LOG_FORMAT", "text");
        let config = load_sync_config(&env, Platform::Lambda).unwrap();
        assert_eq!(config.completion, CompletionMode::None);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn lambda_defaults_to_json_logs() {
        let config = load_sync_config(&base_env(), Platform::Lambda).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_completion_mode_fails() {
        let mut env = base_env();
        env.set("KENDRA_SYNC_COMPLETION_MODE", "maybe");
        assert!(load_sync_config(&env, Platform::Local).is_err());
    }

    #[test]
    fn stack_parameters_parse_error_mentions_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stack_name = [").unwrap();
        let err = load_stack_parameters(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn stack_parameters_missing_file() {
        let err = load_stack_parameters(Path::new("/nonexistent/stack.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
