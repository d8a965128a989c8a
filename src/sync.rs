//! Manual sync: start one data source sync job from a workstation

use anyhow::{Context, Result};
use clap::Args;
use kendra_sync_config::env::{self, ENV_PREFIX};
use kendra_sync_config::{EnvSource, Layered, MapEnvSource, Platform, StdEnvSource, SyncConfig};
use kendra_sync_lambda::{init_tracing, start_sync, KendraSyncJobStarter};

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Kendra index id (overrides INDEX_ID)
    #[arg(long, value_name = "ID")]
    pub index_id: Option<String>,

    /// Kendra data source id (overrides DS_ID)
    #[arg(long, value_name = "ID")]
    pub data_source_id: Option<String>,

    /// AWS region of the index (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl SyncArgs {
    /// Flags expressed as environment entries so they layer over the process env
    fn overrides(&self) -> MapEnvSource {
        let mut vars = MapEnvSource::new();
        if let Some(index_id) = &self.index_id {
            vars.set(env::INDEX_ID, index_id.as_str());
        }
        if let Some(data_source_id) = &self.data_source_id {
            vars.set(env::DATA_SOURCE_ID, data_source_id.as_str());
        }
        if let Some(region) = &self.region {
            vars.set(env::AWS_REGION, region.as_str());
        }
        if let Some(level) = &self.log_level {
            vars.set(format!("{}{}", ENV_PREFIX, env::LOG_LEVEL), level.as_str());
        }
        vars
    }

    fn resolve<E: EnvSource>(&self, base: E) -> Result<SyncConfig> {
        let layered = Layered {
            top: self.overrides(),
            base,
        };
        SyncConfig::from_source(&layered, Platform::Local)
            .context("Pass --index-id/--data-source-id or set INDEX_ID/DS_ID")
    }
}

pub async fn run(args: SyncArgs) -> Result<()> {
    let config = args.resolve(StdEnvSource)?;
    init_tracing(&config.logging);

    let starter = KendraSyncJobStarter::from_defaults(config.region.as_deref()).await;
    let handle = start_sync(&starter, &config).await?;

    match handle.execution_id {
        Some(execution_id) => println!("Started sync job {}", execution_id),
        None => println!("Started sync job"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kendra_sync_config::ConfigError;

    #[test]
    fn flags_win_over_environment() {
        let args = SyncArgs {
            index_id: Some("idx-flag".to_string()),
            region: Some("eu-west-1".to_string()),
            ..SyncArgs::default()
        };
        let base = MapEnvSource::from_pairs(&[
            ("INDEX_ID", "idx-env"),
            ("DS_ID", "ds-env"),
            ("AWS_REGION", "us-east-1"),
        ]);

        let config = args.resolve(base).unwrap();
        assert_eq!(config.index_id, "idx-flag");
        assert_eq!(config.data_source_id, "ds-env");
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn log_level_flag_maps_to_prefixed_key() {
        let args = SyncArgs {
            index_id: Some("idx".to_string()),
            data_source_id: Some("ds".to_string()),
            log_level: Some("debug".to_string()),
            ..SyncArgs::default()
        };

        let config = args.resolve(MapEnvSource::new()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn missing_data_source_is_reported() {
        let args = SyncArgs {
            index_id: Some("idx".to_string()),
            ..SyncArgs::default()
        };

        let err = args.resolve(MapEnvSource::new()).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(config_err.key(), Some("DS_ID"));
    }
}
