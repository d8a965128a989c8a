//! AWS CloudFormation template generator for the index + connector stack

use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input, Select};
use kendra_sync_config::{
    parse_s3_uri, validate_stack_name, Connector, GoogleDriveConnector, KendraEdition, ModelId,
    SharePointConnector, SharePointVersion, StackParameters,
};
use std::fs;
use std::path::PathBuf;

use super::names;

const TEMPLATE: &str = include_str!("../../templates/cloudformation.yaml");

#[derive(Args)]
pub struct AwsArgs {
    /// TOML file with stack parameters; flags below override its top-level values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CloudFormation stack name
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Anthropic model id for the query function
    #[arg(long)]
    pub model_id: Option<String>,

    /// Kendra edition: DEVELOPER_EDITION or ENTERPRISE_EDITION
    #[arg(long)]
    pub edition: Option<String>,

    /// Document connector: "sharepoint" or "google-drive"
    #[arg(long)]
    pub connector: Option<String>,

    /// SharePoint version (SHAREPOINT_2013, SHAREPOINT_2016, SHAREPOINT_ONLINE)
    #[arg(long)]
    pub sharepoint_version: Option<String>,

    /// SharePoint site URL (repeat or comma-separate, max 100)
    #[arg(long = "url", value_delimiter = ',')]
    pub urls: Vec<String>,

    /// ARN of the Secrets Manager secret holding connector credentials
    #[arg(long)]
    pub secret_arn: Option<String>,

    /// S3 URI of the sync trigger package (e.g., s3://my-bucket/kendra-sync-lambda-arm64.zip)
    #[arg(long)]
    pub sync_code: Option<String>,

    /// S3 URI of the query function package
    #[arg(long)]
    pub query_code: Option<String>,

    /// CloudWatch log retention in days
    #[arg(long)]
    pub retention: Option<u16>,

    /// Where to write the rendered template
    #[arg(long, default_value = "template.yaml")]
    pub output: PathBuf,

    /// Overwrite existing file without asking
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: AwsArgs) -> Result<()> {
    println!();
    println!("kendra-sync create - Kendra index + connector + sync trigger");
    println!();

    let params = resolve_parameters(&args)?;
    let content = render_template(&params)?;

    let output_path = args.output.as_path();
    if output_path.exists() && !args.force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    fs::write(output_path, &content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!();
    println!("Created {}", output_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Deploy:");
    println!("     aws cloudformation deploy \\");
    println!("       --template-file {} \\", output_path.display());
    println!("       --stack-name {} \\", params.stack_name);
    println!("       --capabilities CAPABILITY_NAMED_IAM");
    println!();
    println!("The first sync job starts once the stack finishes creating.");
    println!("Re-run it later with: kendra-sync sync --index-id <id> --data-source-id <id>");
    println!();

    Ok(())
}

fn resolve_parameters(args: &AwsArgs) -> Result<StackParameters> {
    let mut params = match &args.config {
        Some(path) => StackParameters::load_from_path(path)
            .with_context(|| format!("Failed to load stack parameters from {}", path.display()))?,
        None => prompt_parameters(args)?,
    };

    if let Some(name) = &args.stack_name {
        params.stack_name = name.clone();
    }
    if let Some(model) = &args.model_id {
        params.model_id = model.parse()?;
    }
    if let Some(edition) = &args.edition {
        params.edition = edition.parse()?;
    }
    if let Some(retention) = args.retention {
        params.log_retention_days = retention;
    }

    params.validate()?;
    Ok(params)
}

/// Collect parameters from flags, prompting for anything missing
fn prompt_parameters(args: &AwsArgs) -> Result<StackParameters> {
    let stack_name = match &args.stack_name {
        Some(name) => name.clone(),
        None => Input::new()
            .with_prompt("Stack name")
            .default(names::generate())
            .validate_with(|input: &String| validate_stack_name(input).map_err(|e| e.to_string()))
            .interact_text()?,
    };

    let model_id = match &args.model_id {
        Some(model) => model.parse::<ModelId>()?,
        None => {
            let options: Vec<&str> = ModelId::ALL.iter().map(|m| m.as_str()).collect();
            let selection = Select::new()
                .with_prompt("Model for the query function")
                .items(&options)
                .default(options.len() - 1)
                .interact()?;
            ModelId::ALL[selection]
        }
    };

    let edition = match &args.edition {
        Some(edition) => edition.parse::<KendraEdition>()?,
        None => KendraEdition::default(),
    };

    let connector_kind = match &args.connector {
        Some(kind) => kind.to_lowercase(),
        None => {
            let options = &["SharePoint", "Google Drive"];
            let selection = Select::new()
                .with_prompt("Document connector")
                .items(options)
                .default(0)
                .interact()?;
            if selection == 0 {
                "sharepoint".to_string()
            } else {
                "google-drive".to_string()
            }
        }
    };

    let secret_arn = match &args.secret_arn {
        Some(arn) => arn.clone(),
        None => Input::new()
            .with_prompt("Secrets Manager ARN with connector credentials")
            .interact_text()?,
    };

    let connector = match connector_kind.as_str() {
        "sharepoint" => {
            let version = match &args.sharepoint_version {
                Some(v) => v.parse::<SharePointVersion>()?,
                None => SharePointVersion::default(),
            };
            let urls = if args.urls.is_empty() {
                let raw: String = Input::new()
                    .with_prompt("SharePoint site URLs (comma-separated)")
                    .interact_text()?;
                split_urls(&raw)
            } else {
                args.urls.iter().map(|u| u.trim().to_string()).collect()
            };
            Connector::SharePoint(SharePointConnector {
                version,
                urls,
                secret_arn,
            })
        }
        "google-drive" | "googledrive" => Connector::GoogleDrive(GoogleDriveConnector {
            secret_arn,
            exclude_mime_types: Vec::new(),
        }),
        other => bail!(
            "Invalid connector '{}'. Must be 'sharepoint' or 'google-drive'.",
            other
        ),
    };

    let sync_function_code = match &args.sync_code {
        Some(uri) => uri.clone(),
        None => Input::new()
            .with_prompt("S3 URI of the sync trigger package")
            .validate_with(validate_s3_uri)
            .interact_text()?,
    };

    let query_function_code = match &args.query_code {
        Some(uri) => uri.clone(),
        None => Input::new()
            .with_prompt("S3 URI of the query function package")
            .validate_with(validate_s3_uri)
            .interact_text()?,
    };

    Ok(StackParameters {
        stack_name,
        model_id,
        edition,
        connector,
        sync_function_code,
        query_function_code,
        log_retention_days: args.retention.unwrap_or(7),
    })
}

fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

#[allow(clippy::ptr_arg)]
fn validate_s3_uri(input: &String) -> Result<(), String> {
    if parse_s3_uri(input).is_none() {
        return Err("S3 URI must look like s3://bucket/key.zip".to_string());
    }
    Ok(())
}

/// Render the CloudFormation template for validated parameters
pub fn render_template(params: &StackParameters) -> Result<String> {
    params.validate()?;

    let (sync_bucket, sync_key) =
        parse_s3_uri(&params.sync_function_code).context("Invalid sync_function_code")?;
    let (query_bucket, query_key) =
        parse_s3_uri(&params.query_function_code).context("Invalid query_function_code")?;

    let content = TEMPLATE
        .replace("{{STACK_NAME}}", &params.stack_name)
        .replace("{{MODEL_ID}}", params.model_id.as_str())
        .replace("{{KENDRA_EDITION}}", params.edition.as_str())
        .replace("{{CONNECTOR_LABEL}}", params.connector.label())
        .replace("{{DATA_SOURCE_TYPE}}", params.connector.data_source_type())
        .replace(
            "{{DATA_SOURCE_CONFIGURATION}}",
            &data_source_configuration(&params.connector),
        )
        .replace("{{SECRET_ARN}}", &yaml_quote(params.connector.secret_arn()))
        .replace("{{SYNC_CODE_BUCKET}}", &yaml_quote(sync_bucket))
        .replace("{{SYNC_CODE_KEY}}", &yaml_quote(sync_key))
        .replace("{{QUERY_CODE_BUCKET}}", &yaml_quote(query_bucket))
        .replace("{{QUERY_CODE_KEY}}", &yaml_quote(query_key))
        .replace("{{LOG_RETENTION}}", &params.log_retention_days.to_string());

    Ok(content)
}

/// `DataSourceConfiguration` body, indented to sit under its key
fn data_source_configuration(connector: &Connector) -> String {
    const INDENT: &str = "        ";
    let mut lines = Vec::new();

    match connector {
        Connector::SharePoint(sp) => {
            lines.push(format!("{INDENT}SharePointConfiguration:"));
            lines.push(format!("{INDENT}  SharePointVersion: {}", sp.version.as_str()));
            lines.push(format!("{INDENT}  SecretArn: !Ref SecretArn"));
            lines.push(format!("{INDENT}  Urls:"));
            for url in &sp.urls {
                lines.push(format!("{INDENT}    - {}", yaml_quote(url)));
            }
        }
        Connector::GoogleDrive(gd) => {
            lines.push(format!("{INDENT}GoogleDriveConfiguration:"));
            lines.push(format!("{INDENT}  SecretArn: !Ref SecretArn"));
            if !gd.exclude_mime_types.is_empty() {
                lines.push(format!("{INDENT}  ExcludeMimeTypes:"));
                for mime in &gd.exclude_mime_types {
                    lines.push(format!("{INDENT}    - {}", yaml_quote(mime)));
                }
            }
        }
    }

    lines.join("\n")
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
