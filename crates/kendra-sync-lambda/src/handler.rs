// Sync trigger handler
//
// One invocation = one StartDataSourceSyncJob call, then at most one
// custom resource response. Errors propagate to the runtime untouched.

use kendra_sync_config::CompletionMode;
use tracing::{error, info};

use crate::error::{Result, SyncError};
use crate::event::{CustomResourceRequest, TriggerEvent};
use crate::kendra::start_sync;
use crate::response::{CustomResourceResponse, ResponseStatus};
use crate::LambdaState;

/// Handle one trigger event.
///
/// Returns `Some(Success)` when a custom resource response was issued and
/// `None` when the invocation is silent.
pub async fn handle_trigger(
    event: TriggerEvent,
    log_stream: &str,
    state: &LambdaState,
) -> Result<Option<ResponseStatus>> {
    let target = completion_target(state.config.completion, event);

    if let Ok(Some(request)) = &target {
        info!(
            request_type = ?request.request_type,
            logical_resource_id = %request.logical_resource_id,
            "Received custom resource request"
        );
    }

    // The job starts whatever the event shape; a missing response target
    // is reported afterwards.
    start_sync(state.starter.as_ref(), &state.config).await?;

    let Some(request) = target? else {
        return Ok(None);
    };

    let response = CustomResourceResponse::success(&request, log_stream);
    // Delivery failure is logged only; the sync job has already started.
    if let Err(err) = state
        .completion
        .send(&request.response_url, &response)
        .await
    {
        error!(
            error = %err,
            logical_resource_id = %request.logical_resource_id,
            "Failed to deliver custom resource response"
        );
    }

    Ok(Some(ResponseStatus::Success))
}

/// Decide whether this invocation ends with a response document
fn completion_target(
    mode: CompletionMode,
    event: TriggerEvent,
) -> Result<Option<Box<CustomResourceRequest>>> {
    match (mode, event) {
        (CompletionMode::None, _) => Ok(None),
        (_, TriggerEvent::CustomResource(request)) => Ok(Some(request)),
        (CompletionMode::CfnResponse, TriggerEvent::Other(_)) => Err(SyncError::NotCustomResource),
        (CompletionMode::Auto, TriggerEvent::Other(_)) => Ok(None),
    }
}
