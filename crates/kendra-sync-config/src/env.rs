use std::collections::HashMap;

/// Prefix for tuning knobs owned by this project.
/// Resource identifiers (`INDEX_ID`, `DS_ID`) stay unprefixed so existing
/// stack definitions keep working.
pub const ENV_PREFIX: &str = "KENDRA_SYNC_";

pub const INDEX_ID: &str = "INDEX_ID";
pub const DATA_SOURCE_ID: &str = "DS_ID";
pub const AWS_REGION: &str = "AWS_REGION";

/// Prefixed keys (looked up as `KENDRA_SYNC_<key>`)
pub const COMPLETION_MODE: &str = "COMPLETION_MODE";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

/// Abstraction over environment-variable lookups so tests and the CLI can
/// supply their own values without mutating the process environment.
pub trait EnvSource {
    /// Get a variable WITH the `KENDRA_SYNC_` prefix applied
    fn get(&self, key: &str) -> Option<String>;

    /// Get a variable exactly as named
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Process environment
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment. Keys are stored fully qualified (prefix included).
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { vars }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&format!("{}{}", ENV_PREFIX, key)).cloned()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Two sources where `top` wins over `base` key by key
pub struct Layered<A, B> {
    pub top: A,
    pub base: B,
}

impl<A: EnvSource, B: EnvSource> EnvSource for Layered<A, B> {
    fn get(&self, key: &str) -> Option<String> {
        self.top.get(key).or_else(|| self.base.get(key))
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.top.get_raw(key).or_else(|| self.base.get_raw(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_source_applies_prefix_for_get() {
        let env = MapEnvSource::from_pairs(&[("KENDRA_SYNC_LOG_LEVEL", "debug"), ("DS_ID", "ds")]);
        assert_eq!(env.get(LOG_LEVEL).as_deref(), Some("debug"));
        assert_eq!(env.get_raw(LOG_LEVEL), None);
        assert_eq!(env.get_raw(DATA_SOURCE_ID).as_deref(), Some("ds"));
    }

    #[test]
    fn layered_prefers_top() {
        let layered = Layered {
            top: MapEnvSource::from_pairs(&[("INDEX_ID", "from-flag")]),
            base: MapEnvSource::from_pairs(&[("INDEX_ID", "from-env"), ("DS_ID", "ds-1")]),
        };
        assert_eq!(layered.get_raw(INDEX_ID).as_deref(), Some("from-flag"));
        assert_eq!(layered.get_raw(DATA_SOURCE_ID).as_deref(), Some("ds-1"));
    }
}
