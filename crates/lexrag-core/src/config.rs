//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! into the `chunking` and `retrieval` sections, each of which falls back to
//! its defaults when absent.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::chunker::ChunkingConfig;
use crate::types::RetrievalMode;

pub const DEFAULT_KEYWORD_K: usize = 5;
pub const DEFAULT_VECTOR_K: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub keyword_k: usize,
    pub vector_k: usize,
    pub mode: RetrievalMode,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { keyword_k: DEFAULT_KEYWORD_K, vector_k: DEFAULT_VECTOR_K, mode: RetrievalMode::Auto }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Merge `config.toml`, then `config.<env>.toml` for `RUST_ENV`, then
    /// `APP_*` variables (`__` separates nested keys) from `base`.
    pub fn load_from(base: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn chunking(&self) -> anyhow::Result<ChunkingConfig> {
        self.section("chunking")
    }

    pub fn retrieval(&self) -> anyhow::Result<RetrievalConfig> {
        self.section("retrieval")
    }

    fn section<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.figment.contains(key) { self.get(key) } else { Ok(T::default()) }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let chunking = self.chunking()?;
        if chunking.target_words == 0 {
            anyhow::bail!(crate::error::Error::InvalidConfig("chunking.target_words must be at least 1".into()));
        }
        if chunking.overlap >= chunking.target_words {
            warn!(
                target_words = chunking.target_words,
                overlap = chunking.overlap,
                "chunking.overlap is not below chunking.target_words; windows will advance one word at a time"
            );
        }
        self.retrieval()?;
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

