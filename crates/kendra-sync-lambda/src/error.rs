//! Error types for the sync trigger

use kendra_sync_config::ConfigError;
use thiserror::Error;

/// Every failure here ends the invocation; nothing is retried locally.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The StartDataSourceSyncJob call was rejected or never completed
    #[error("failed to start sync job for data source '{data_source_id}' on index '{index_id}': {message}")]
    StartSync {
        data_source_id: String,
        index_id: String,
        message: String,
    },

    #[error("completion mode 'cfn-response' requires a CloudFormation custom resource event")]
    NotCustomResource,

    #[error("failed to send custom resource response: {0}")]
    Completion(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
