//! Create command - renders the CloudFormation stack for an index and its connector

mod names;

pub mod aws;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum DeployCommand {
    /// Generate template.yaml for Kendra + connector + sync trigger + query function
    Aws(aws::AwsArgs),
}

impl DeployCommand {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            DeployCommand::Aws(args) => aws::run(args),
        }
    }
}
