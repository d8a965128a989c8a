//! Outbound StartDataSourceSyncJob call
//!
//! The client is built once per process and injected through
//! [`SyncJobStarter`], so warm invocations reuse the same connection pool.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_kendra::error::DisplayErrorContext;
use kendra_sync_config::SyncConfig;
use tracing::info;

use crate::error::{Result, SyncError};

/// Opaque handle returned by the service. Logged, never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncJobHandle {
    pub execution_id: Option<String>,
}

#[async_trait]
pub trait SyncJobStarter: Send + Sync {
    /// Ask Kendra to start crawling `data_source_id` into `index_id`
    async fn start_sync_job(&self, data_source_id: &str, index_id: &str) -> Result<SyncJobHandle>;
}

/// Kendra SDK-backed starter
#[derive(Clone)]
pub struct KendraSyncJobStarter {
    client: aws_sdk_kendra::Client,
}

impl KendraSyncJobStarter {
    pub fn new(client: aws_sdk_kendra::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential chain, optionally pinned to a region
    pub async fn from_defaults(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;
        Self::new(aws_sdk_kendra::Client::new(&sdk_config))
    }
}

#[async_trait]
impl SyncJobStarter for KendraSyncJobStarter {
    async fn start_sync_job(&self, data_source_id: &str, index_id: &str) -> Result<SyncJobHandle> {
        let output = self
            .client
            .start_data_source_sync_job()
            .id(data_source_id)
            .index_id(index_id)
            .send()
            .await
            .map_err(|e| SyncError::StartSync {
                data_source_id: data_source_id.to_string(),
                index_id: index_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(SyncJobHandle {
            execution_id: output.execution_id().map(str::to_string),
        })
    }
}

/// Start one sync job for the configured data source. No retry.
pub async fn start_sync(starter: &dyn SyncJobStarter, config: &SyncConfig) -> Result<SyncJobHandle> {
    info!(
        index_id = %config.index_id,
        data_source_id = %config.data_source_id,
        "Starting data source sync job"
    );

    let handle = starter
        .start_sync_job(&config.data_source_id, &config.index_id)
        .await?;

    info!(
        execution_id = handle.execution_id.as_deref().unwrap_or("unknown"),
        "Data source sync job started successfully"
    );
    Ok(handle)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every call; fails all of them when `fail` is set
    #[derive(Default)]
    pub(crate) struct RecordingStarter {
        pub calls: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    impl RecordingStarter {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SyncJobStarter for RecordingStarter {
        async fn start_sync_job(
            &self,
            data_source_id: &str,
            index_id: &str,
        ) -> Result<SyncJobHandle> {
            self.calls
                .lock()
                .unwrap()
                .push((data_source_id.to_string(), index_id.to_string()));
            if self.fail {
                return Err(SyncError::StartSync {
                    data_source_id: data_source_id.to_string(),
                    index_id: index_id.to_string(),
                    message: "ConflictException: a sync job is already running".to_string(),
                });
            }
            Ok(SyncJobHandle {
                execution_id: Some("exec-0001".to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingStarter;
    use super::*;
    use kendra_sync_config::{CompletionMode, LogConfig};

    fn config() -> SyncConfig {
        SyncConfig {
            index_id: "idx-123".to_string(),
            data_source_id: "ds-456".to_string(),
            region: None,
            completion: CompletionMode::None,
            logging: LogConfig::default(),
        }
    }

    #[tokio::test]
    async fn passes_data_source_then_index() {
        let starter = RecordingStarter::default();
        let handle = start_sync(&starter, &config()).await.unwrap();

        assert_eq!(
            starter.calls(),
            vec![("ds-456".to_string(), "idx-123".to_string())]
        );
        assert_eq!(handle.execution_id.as_deref(), Some("exec-0001"));
    }

    #[tokio::test]
    async fn failure_propagates_after_single_attempt() {
        let starter = RecordingStarter::failing();
        let err = start_sync(&starter, &config()).await.unwrap_err();

        assert_eq!(starter.calls().len(), 1);
        assert!(err.to_string().contains("ds-456"));
        assert!(err.to_string().contains("ConflictException"));
    }
}
