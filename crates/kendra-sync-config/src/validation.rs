// Configuration validation
//
// Validates that required fields are present and values are sensible

use crate::*;
use tracing::warn;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// CloudWatch Logs accepts only these retention periods
const LOG_RETENTION_DAYS: &[u16] = &[
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557, 2922,
    3288, 3653,
];

const MAX_SHAREPOINT_URLS: usize = 100;

/// IAM role names are capped at 64 chars
const MAX_ROLE_NAME_LEN: usize = 64;

/// Longest suffix the template appends to the stack name in a `RoleName`
const LONGEST_ROLE_SUFFIX: &str = "-GoogleDriveDSRole";

const MAX_STACK_NAME_LEN: usize = MAX_ROLE_NAME_LEN - LONGEST_ROLE_SUFFIX.len();

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

pub fn validate_sync_config(config: &SyncConfig) -> Result<()> {
    if config.index_id.trim().is_empty() {
        return Err(ConfigError::empty(env::INDEX_ID));
    }
    if config.data_source_id.trim().is_empty() {
        return Err(ConfigError::empty(env::DATA_SOURCE_ID));
    }

    validate_log_config(&config.logging)?;
    Ok(())
}

fn validate_log_config(config: &LogConfig) -> Result<()> {
    let level = config.level.trim();
    // Full EnvFilter directives ("info,aws_smithy_runtime=warn") are passed through
    if level.contains('=') || level.contains(',') {
        return Ok(());
    }
    if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        return Err(ConfigError::invalid_value(
            &format!("{}{}", env::ENV_PREFIX, env::LOG_LEVEL),
            level,
            "trace, debug, info, warn, error, or off",
        ));
    }
    Ok(())
}

pub fn validate_stack_parameters(params: &StackParameters) -> Result<()> {
    validate_stack_name(&params.stack_name)?;
    validate_code_location("sync_function_code", &params.sync_function_code)?;
    validate_code_location("query_function_code", &params.query_function_code)?;

    if !LOG_RETENTION_DAYS.contains(&params.log_retention_days) {
        return Err(invalid(format!(
            "log_retention_days {} is not a CloudWatch retention period",
            params.log_retention_days
        )));
    }

    validate_secret_arn(params.connector.secret_arn())?;

    match &params.connector {
        Connector::SharePoint(sp) => validate_sharepoint(sp)?,
        Connector::GoogleDrive(gd) => {
            if gd.exclude_mime_types.iter().any(|m| !m.contains('/')) {
                return Err(invalid(
                    "connector.exclude_mime_types entries must look like 'type/subtype'",
                ));
            }
        }
    }

    if params.edition == KendraEdition::Enterprise {
        warn!(
            stack_name = %params.stack_name,
            "ENTERPRISE_EDITION indexes are billed hourly from creation"
        );
    }

    Ok(())
}

/// Stack names: letter first, then letters, digits, hyphens. Short enough
/// that every role name derived from it fits IAM's limit.
pub fn validate_stack_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_STACK_NAME_LEN {
        return Err(invalid(format!(
            "stack_name must be 1-{} characters",
            MAX_STACK_NAME_LEN
        )));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("stack_name must start with a letter"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(
            "stack_name must contain only letters, numbers, and hyphens",
        ));
    }
    Ok(())
}

/// Split an `s3://bucket/key` URI
pub fn parse_s3_uri(uri: &str) -> Option<(&str, &str)> {
    let path = uri.strip_prefix("s3://")?;
    let (bucket, key) = path.split_once('/')?;
    if bucket.is_empty() || key.is_empty() {
        return None;
    }
    Some((bucket, key))
}

fn validate_code_location(field: &str, uri: &str) -> Result<()> {
    if parse_s3_uri(uri).is_none() {
        return Err(ConfigError::invalid_value(field, uri, "s3://bucket/key"));
    }
    Ok(())
}

/// `arn:<partition>:secretsmanager:<region>:<account>:secret:<name>` in any aws partition
fn validate_secret_arn(arn: &str) -> Result<()> {
    let parts: Vec<&str> = arn.splitn(7, ':').collect();
    let is_secret = parts.len() == 7
        && parts[0] == "arn"
        && (parts[1] == "aws" || parts[1].starts_with("aws-"))
        && parts[2] == "secretsmanager"
        && parts[5] == "secret"
        && !parts[6].is_empty();
    if !is_secret {
        return Err(ConfigError::invalid_value(
            "connector.secret_arn",
            arn,
            "a Secrets Manager secret ARN",
        ));
    }
    Ok(())
}

fn validate_sharepoint(sp: &SharePointConnector) -> Result<()> {
    if sp.urls.is_empty() {
        return Err(invalid("connector.urls must list at least one site"));
    }
    if sp.urls.len() > MAX_SHAREPOINT_URLS {
        return Err(invalid(format!(
            "connector.urls accepts at most {} sites, got {}",
            MAX_SHAREPOINT_URLS,
            sp.urls.len()
        )));
    }
    for url in &sp.urls {
        if !url.starts_with("https://") {
            return Err(ConfigError::invalid_value(
                "connector.urls",
                url,
                "an https:// site URL",
            ));
        }
    }
    Ok(())
}
