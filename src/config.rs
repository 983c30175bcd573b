//! Runner configuration, read from `BLOCKFALL_*` environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};

use crate::core::{RotationPolicy, Settings};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const ENV_WIDTH: &str = "BLOCKFALL_WIDTH";
pub const ENV_HEIGHT: &str = "BLOCKFALL_HEIGHT";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_STRICT_ROTATION: &str = "BLOCKFALL_STRICT_ROTATION";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

const DEFAULT_LOG_PATH: &str = "blockfall.log";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    /// `None` means "seed from the clock"
    pub seed: Option<u32>,
    pub strict_rotation: bool,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            strict_rotation: false,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (variable name -> value).
    ///
    /// Unset or blank variables fall back to defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let width = match get(ENV_WIDTH) {
            Some(v) => parse_dimension(ENV_WIDTH, &v)?,
            None => defaults.width,
        };
        let height = match get(ENV_HEIGHT) {
            Some(v) => parse_dimension(ENV_HEIGHT, &v)?,
            None => defaults.height,
        };
        let seed = get(ENV_SEED)
            .map(|v| {
                v.parse::<u32>()
                    .with_context(|| format!("{ENV_SEED}: invalid seed {v:?}"))
            })
            .transpose()?;
        let strict_rotation = get(ENV_STRICT_ROTATION)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.strict_rotation);
        let log_path = get(ENV_LOG_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        Ok(Self {
            width,
            height,
            seed,
            strict_rotation,
            log_path,
        })
    }

    /// Core settings; a missing seed is taken from the wall clock
    pub fn settings(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            seed: self.seed.unwrap_or_else(clock_seed),
            rotation_policy: if self.strict_rotation {
                RotationPolicy::Strict
            } else {
                RotationPolicy::Permissive
            },
        }
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<usize> {
    let n: usize = value
        .parse()
        .with_context(|| format!("{key}: expected a positive cell count, got {value:?}"))?;
    if n == 0 {
        return Err(anyhow!("{key}: must be at least 1"));
    }
    Ok(n)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
