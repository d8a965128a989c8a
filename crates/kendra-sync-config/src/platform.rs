// Platform detection based on environment variables
//
// - AWS Lambda: AWS_LAMBDA_FUNCTION_NAME env var present
// - Local: anything else (CLI on a workstation, CI)

use crate::env::EnvSource;
use crate::LogFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Lambda,
    Local,
}

impl Platform {
    /// Auto-detect the current platform from the process environment
    pub fn detect() -> Self {
        Self::detect_from(&crate::env::StdEnvSource)
    }

    pub fn detect_from<E: EnvSource>(env: &E) -> Self {
        if env.get_raw("AWS_LAMBDA_FUNCTION_NAME").is_some() {
            Platform::Lambda
        } else {
            Platform::Local
        }
    }

    /// Get platform-specific defaults
    pub fn defaults(&self) -> PlatformDefaults {
        match self {
            // CloudWatch Logs indexes JSON lines
            Platform::Lambda => PlatformDefaults {
                log_level: "info",
                log_format: LogFormat::Json,
            },
            Platform::Local => PlatformDefaults {
                log_level: "info",
                log_format: LogFormat::Text,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlatformDefaults {
    pub log_level: &'static str,
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvSource;

    #[test]
    fn detects_lambda_from_function_name() {
        let env = MapEnvSource::from_pairs(&[("AWS_LAMBDA_FUNCTION_NAME", "sync-trigger")]);
        assert_eq!(Platform::detect_from(&env), Platform::Lambda);
        assert_eq!(Platform::detect_from(&MapEnvSource::default()), Platform::Local);
    }

    #[test]
    fn test_platform_defaults() {
        assert_eq!(Platform::Lambda.defaults().log_format, LogFormat::Json);
        assert_eq!(Platform::Local.defaults().log_format, LogFormat::Text);
        assert_eq!(Platform::Local.defaults().log_level, "info");
    }
}
