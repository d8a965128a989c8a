// Trigger event shapes
//
// The function is invoked either by a CloudFormation custom resource (which
// expects a response document PUT to ResponseURL) or by anything else
// (a CDK trigger, a manual `aws lambda invoke`). The payload is otherwise unused.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TriggerEvent {
    CustomResource(Box<CustomResourceRequest>),
    Other(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// CloudFormation custom resource request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceRequest {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_properties: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_custom_resource_create() {
        let event: TriggerEvent = serde_json::from_value(json!({
            "RequestType": "Create",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/presigned",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/search/abc",
            "RequestId": "req-1",
            "ResourceType": "Custom::DataSourceSync",
            "LogicalResourceId": "DataSourceSyncTrigger",
            "ResourceProperties": {"ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:sync"}
        }))
        .unwrap();

        match event {
            TriggerEvent::CustomResource(request) => {
                assert_eq!(request.request_type, RequestType::Create);
                assert_eq!(request.logical_resource_id, "DataSourceSyncTrigger");
                assert!(request.physical_resource_id.is_none());
            }
            TriggerEvent::Other(_) => panic!("expected custom resource event"),
        }
    }

    #[test]
    fn arbitrary_payloads_are_accepted() {
        for payload in [json!({}), json!(null), json!({"RequestType": "Create"}), json!("go")] {
            let event: TriggerEvent = serde_json::from_value(payload).unwrap();
            assert!(matches!(event, TriggerEvent::Other(_)));
        }
    }

    #[test]
    fn unknown_request_type_is_not_a_custom_resource() {
        let event: TriggerEvent = serde_json::from_value(json!({
            "RequestType": "Rollback",
            "ResponseURL": "https://example.com",
            "StackId": "s",
            "RequestId": "r",
            "LogicalResourceId": "l"
        }))
        .unwrap();
        assert!(matches!(event, TriggerEvent::Other(_)));
    }
}
