use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Backing store used underneath the serializing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Moka,
    Foyer,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moka" => Ok(Backend::Moka),
            "foyer" => Ok(Backend::Foyer),
            other => Err(Error::Config(format!("unknown cache backend '{}'", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub cache_name: String,
    pub backend: Backend,
    pub max_entries: Option<u64>, // moka only, None = unbounded
    pub mem_bytes: usize,         // foyer capacity
    pub default_ttl_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_name: Self::DEFAULT_CACHE_NAME.to_string(),
            backend: Backend::Moka,
            max_entries: None,
            mem_bytes: Self::DEFAULT_MEM_BYTES,
            default_ttl_ms: None,
        }
    }
}

impl Config {
    const DEFAULT_CACHE_NAME: &str = "default";
    const DEFAULT_MEM_BYTES: usize = 64 * 1024 * 1024;

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads variables from a `.env`-style file, falling back to the process
    /// environment for anything the file does not set. The process environment
    /// itself is left untouched.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .and_then(|iter| iter.collect::<std::result::Result<HashMap<_, _>, _>>())
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded {} environment variables from {}",
            vars.len(),
            path.display()
        );
        Ok(Self::from_lookup(|name| {
            vars.get(name).cloned().or_else(|| std::env::var(name).ok())
        }))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("CARBON_CACHE_BACKEND") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to moka", e);
                Backend::Moka
            }),
            None => defaults.backend,
        };

        Self {
            cache_name: lookup("CARBON_CACHE_NAME").unwrap_or(defaults.cache_name),
            backend,
            max_entries: parse_var(&lookup, "CARBON_CACHE_MAX_ENTRIES"),
            mem_bytes: parse_var(&lookup, "CARBON_CACHE_MEM_BYTES").unwrap_or(defaults.mem_bytes),
            default_ttl_ms: parse_var(&lookup, "CARBON_CACHE_DEFAULT_TTL_MS")
                .filter(|ttl: &u64| *ttl > 0),
        }
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_ms.map(Duration::from_millis)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value '{}', ignoring it", name, raw);
            None
        }
    }
}
