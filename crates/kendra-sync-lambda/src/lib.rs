// AWS Lambda adapter for the Kendra data source sync trigger
//
// Configuration is resolved before the runtime loop starts, so a missing
// INDEX_ID or DS_ID fails the cold start instead of an invocation.
// Clients are built once and shared by every warm invocation.

use kendra_sync_config::{LogConfig, Platform, SyncConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

mod error;
mod event;
mod handler;
mod init;
mod kendra;
mod response;

pub use error::SyncError;
pub use event::{CustomResourceRequest, RequestType, TriggerEvent};
pub use handler::handle_trigger;
pub use init::init_tracing;
pub use kendra::{start_sync, KendraSyncJobStarter, SyncJobHandle, SyncJobStarter};
pub use response::{CompletionSender, CustomResourceResponse, HttpCompletionSender, ResponseStatus};

/// Dependencies captured by the service closure
pub struct LambdaState {
    pub config: SyncConfig,
    pub starter: Arc<dyn SyncJobStarter>,
    pub completion: Arc<dyn CompletionSender>,
}

async fn handle_request(
    event: LambdaEvent<TriggerEvent>,
    state: Arc<LambdaState>,
) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();

    let status = handle_trigger(payload, &context.env_config.log_stream, &state).await?;

    match status {
        Some(status) => Ok(serde_json::to_value(status)?),
        None => Ok(Value::Null),
    }
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    let config = SyncConfig::load().inspect_err(|err| {
        init_tracing(&LogConfig::for_platform(Platform::detect()));
        error!(error = %err, "Invalid sync trigger configuration");
    })?;
    init_tracing(&config.logging);

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let starter = KendraSyncJobStarter::new(aws_sdk_kendra::Client::new(&sdk_config));
    let completion = HttpCompletionSender::new()?;

    info!(
        index_id = %config.index_id,
        data_source_id = %config.data_source_id,
        completion = %config.completion,
        "Sync trigger initialized"
    );

    let state = Arc::new(LambdaState {
        config,
        starter: Arc::new(starter),
        completion: Arc::new(completion),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<TriggerEvent>| {
        let state = state.clone();
        async move { handle_request(event, state).await }
    }))
    .await
}
