//! Settings for the drift tracking core.
//!
//! Loaded from defaults, an optional TOML file and `PUSHCONF`-prefixed
//! environment variables (highest priority, `__` path separator).

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[cfg(test)]
mod config_test;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Drift cache sizing and synchronization parameters
    #[serde(default)]
    pub cache: CacheSettings,
    /// Config Lookup collaborator call parameters
    #[serde(default)]
    pub lookup: LookupSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheSettings {
    /// Number of lock stripes serializing populate-on-miss and mutation
    /// per group identity. More stripes, less cross-group contention.
    #[serde(default = "default_lock_stripes")]
    pub lock_stripes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupSettings {
    /// Upper bound for one Config Lookup call (milliseconds). An answer
    /// arriving later is surfaced as a timeout failure to the caller.
    #[serde(default = "default_lookup_timeout")]
    pub request_timeout_in_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            lock_stripes: default_lock_stripes(),
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            request_timeout_in_ms: default_lookup_timeout(),
        }
    }
}

fn default_lock_stripes() -> usize {
    64
}

fn default_lookup_timeout() -> u64 {
    3000
}

impl Settings {
    /// Load configuration with priority:
    /// 1. Field defaults
    /// 2. Optional TOML file
    /// 3. Environment variables (highest priority)
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PUSHCONF")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build()?.try_deserialize().map_err(Error::Config)
    }
}
