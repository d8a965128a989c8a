//! Provisioning parameters for the index + connector + functions stack

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, Result};

/// Parameters rendered into the CloudFormation template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackParameters {
    pub stack_name: String,

    #[serde(default)]
    pub model_id: ModelId,

    #[serde(default)]
    pub edition: KendraEdition,

    pub connector: Connector,

    /// `s3://bucket/key` of the sync-trigger function package
    pub sync_function_code: String,

    /// `s3://bucket/key` of the query-answering function package
    pub query_function_code: String,

    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u16,
}

pub(crate) fn default_log_retention_days() -> u16 {
    7
}

/// Anthropic models the query function is allowed to invoke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "anthropic.claude-instant-v1")]
    ClaudeInstantV1,
    #[serde(rename = "anthropic.claude-3-sonnet-20240229-v1:0")]
    Claude3Sonnet,
    #[serde(rename = "anthropic.claude-3-haiku-20240307-v1:0")]
    Claude3Haiku,
    #[default]
    #[serde(rename = "anthropic.claude-v2")]
    ClaudeV2,
}

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::ClaudeInstantV1,
        ModelId::Claude3Sonnet,
        ModelId::Claude3Haiku,
        ModelId::ClaudeV2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::ClaudeInstantV1 => "anthropic.claude-instant-v1",
            ModelId::Claude3Sonnet => "anthropic.claude-3-sonnet-20240229-v1:0",
            ModelId::Claude3Haiku => "anthropic.claude-3-haiku-20240307-v1:0",
            ModelId::ClaudeV2 => "anthropic.claude-v2",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = ModelId::ALL.iter().map(|m| m.as_str()).collect();
                ConfigError::invalid_value("model_id", s, &allowed.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KendraEdition {
    #[default]
    #[serde(rename = "DEVELOPER_EDITION")]
    Developer,
    #[serde(rename = "ENTERPRISE_EDITION")]
    Enterprise,
}

impl KendraEdition {
    pub fn as_str(&self) -> &'static str {
        match self {
            KendraEdition::Developer => "DEVELOPER_EDITION",
            KendraEdition::Enterprise => "ENTERPRISE_EDITION",
        }
    }
}

impl fmt::Display for KendraEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KendraEdition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEVELOPER_EDITION" | "DEVELOPER" => Ok(KendraEdition::Developer),
            "ENTERPRISE_EDITION" | "ENTERPRISE" => Ok(KendraEdition::Enterprise),
            _ => Err(ConfigError::invalid_value(
                "edition",
                s,
                "DEVELOPER_EDITION or ENTERPRISE_EDITION",
            )),
        }
    }
}

/// Document connector feeding the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Connector {
    #[serde(rename = "sharepoint")]
    SharePoint(SharePointConnector),
    #[serde(rename = "google-drive")]
    GoogleDrive(GoogleDriveConnector),
}

impl Connector {
    /// Kendra `DataSource.Type`
    pub fn data_source_type(&self) -> &'static str {
        match self {
            Connector::SharePoint(_) => "SHAREPOINT",
            Connector::GoogleDrive(_) => "GOOGLEDRIVE",
        }
    }

    /// Secrets Manager secret holding the connector credentials
    pub fn secret_arn(&self) -> &str {
        match self {
            Connector::SharePoint(sp) => &sp.secret_arn,
            Connector::GoogleDrive(gd) => &gd.secret_arn,
        }
    }

    /// Short label used in resource names
    pub fn label(&self) -> &'static str {
        match self {
            Connector::SharePoint(_) => "SharePoint",
            Connector::GoogleDrive(_) => "GoogleDrive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePointConnector {
    #[serde(default)]
    pub version: SharePointVersion,
    pub urls: Vec<String>,
    pub secret_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleDriveConnector {
    pub secret_arn: String,
    #[serde(default)]
    pub exclude_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharePointVersion {
    #[serde(rename = "SHAREPOINT_2013")]
    V2013,
    #[serde(rename = "SHAREPOINT_2016")]
    V2016,
    #[default]
    #[serde(rename = "SHAREPOINT_ONLINE")]
    Online,
}

impl SharePointVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePointVersion::V2013 => "SHAREPOINT_2013",
            SharePointVersion::V2016 => "SHAREPOINT_2016",
            SharePointVersion::Online => "SHAREPOINT_ONLINE",
        }
    }
}

impl FromStr for SharePointVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "SHAREPOINT_2013" | "2013" => Ok(SharePointVersion::V2013),
            "SHAREPOINT_2016" | "2016" => Ok(SharePointVersion::V2016),
            "SHAREPOINT_ONLINE" | "ONLINE" => Ok(SharePointVersion::Online),
            _ => Err(ConfigError::invalid_value(
                "connector.version",
                s,
                "SHAREPOINT_2013, SHAREPOINT_2016, or SHAREPOINT_ONLINE",
            )),
        }
    }
}
