// Logging/tracing setup shared by the Lambda and the CLI

use kendra_sync_config::{LogConfig, LogFormat};

/// SDK and HTTP internals are noisy at info
const QUIET_TARGETS: &[&str] = &[
    "aws_config",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "hyper",
    "hyper_util",
    "reqwest",
    "rustls",
];

pub(crate) fn filter_directive(level: &str) -> String {
    let mut directive = level.trim().to_string();
    for target in QUIET_TARGETS {
        // An explicit directive for the target wins over ours
        if !directive.contains(&format!("{}=", target)) {
            directive.push_str(&format!(",{}=warn", target));
        }
    }
    directive
}

/// Initialize tracing/logging from LogConfig. Safe to call more than once.
pub fn init_tracing(config: &LogConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_new(filter_directive(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let _ = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiets_sdk_targets() {
        let directive = filter_directive("debug");
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("aws_smithy_runtime=warn"));
        assert!(directive.contains("reqwest=warn"));
    }

    #[test]
    fn explicit_target_directive_is_kept() {
        let directive = filter_directive("info,aws_smithy_runtime=trace");
        assert!(directive.contains("aws_smithy_runtime=trace"));
        assert!(!directive.contains("aws_smithy_runtime=warn"));
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing(&LogConfig::default());
        init_tracing(&LogConfig::default());
    }
}
