//! Process settings.
//!
//! Settings are resolved once at startup: defaults, then an optional
//! `ewe.toml` in the current or a parent directory, then environment
//! overrides. Nothing re-reads them afterwards.

use crate::error::{EweError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the settings file looked up by [`Settings::load`].
pub const CONFIG_FILE_NAME: &str = "ewe.toml";

/// Which hosted completion API to synthesize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Claude,
    OpenAi,
}

impl FromStr for LlmProvider {
    type Err = EweError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(LlmProvider::Claude),
            "openai" | "gpt" => Ok(LlmProvider::OpenAi),
            other => Err(EweError::invalid_config(
                "llm.provider",
                other,
                "expected claude or openai",
            )),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub literature: LiteratureSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub enrichment: EnrichmentSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub herbal: HerbalSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteratureSettings {
    /// Base URL of the search/fetch relay, e.g. `http://127.0.0.1:3000/api/pubmed`.
    #[serde(default = "default_proxy_base_url")]
    pub proxy_base_url: String,
    /// Base URL of NCBI E-utilities, used by the relay itself.
    #[serde(default = "default_eutils_base_url")]
    pub eutils_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncbi_api_key: Option<String>,
    /// Maximum ids requested per search.
    #[serde(default = "default_retmax")]
    pub retmax: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    /// Optional model override; each provider has its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSettings {
    /// Upper bound on names looked up per research run.
    #[serde(default = "default_max_names")]
    pub max_names: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerbalSettings {
    /// Excerpts handed to the prompt per run.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

// Default value functions
fn default_proxy_base_url() -> String { "http://127.0.0.1:3000/api/pubmed".to_string() }
fn default_eutils_base_url() -> String { "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string() }
fn default_retmax() -> u32 { 20 }
fn default_timeout_secs() -> u64 { 20 }
fn default_provider() -> LlmProvider { LlmProvider::Claude }
fn default_temperature() -> f32 { 0.2 }
fn default_max_tokens() -> u32 { 2048 }
fn default_llm_timeout_secs() -> u32 { 60 }
fn default_max_names() -> usize { 10 }
fn default_batch_size() -> usize { 3 }
fn default_batch_delay_ms() -> u64 { 1000 }
fn default_bind_addr() -> String { "127.0.0.1:3000".to_string() }
fn default_top_k() -> usize { 2 }

impl Default for LiteratureSettings {
    fn default() -> Self {
        Self {
            proxy_base_url: default_proxy_base_url(),
            eutils_base_url: default_eutils_base_url(),
            ncbi_api_key: None,
            retmax: default_retmax(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            anthropic_api_key: None,
            openai_api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            max_names: default_max_names(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for HerbalSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl LlmSettings {
    /// API key for the selected provider.
    pub fn api_key(&self) -> Result<&str> {
        let (key, field) = match self.provider {
            LlmProvider::Claude => (&self.anthropic_api_key, "ANTHROPIC_API_KEY"),
            LlmProvider::OpenAi => (&self.openai_api_key, "OPENAI_API_KEY"),
        };
        key.as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EweError::missing_config(field))
    }
}

impl Settings {
    /// Resolve settings: file (if any), then the process environment.
    pub fn load() -> Result<Self> {
        let mut settings = match find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        tracing::debug!(
            provider = ?settings.llm.provider,
            proxy = %settings.literature.proxy_base_url,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Parse a settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("EWE_PROXY_BASE_URL") {
            self.literature.proxy_base_url = v;
        }
        if let Some(v) = get("EWE_EUTILS_BASE_URL") {
            self.literature.eutils_base_url = v;
        }
        if let Some(v) = get("NCBI_API_KEY") {
            self.literature.ncbi_api_key = Some(v);
        }
        if let Some(v) = get("EWE_LLM_PROVIDER") {
            self.llm.provider = v.parse()?;
        }
        if let Some(v) = get("EWE_LLM_MODEL") {
            self.llm.model = Some(v);
        }
        if let Some(v) = get("ANTHROPIC_API_KEY") {
            self.llm.anthropic_api_key = Some(v);
        }
        if let Some(v) = get("OPENAI_API_KEY") {
            self.llm.openai_api_key = Some(v);
        }
        if let Some(v) = get("EWE_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        Ok(())
    }

    /// Save settings to the specified path. API keys are never written.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Settings as TOML, with API keys removed.
    pub fn to_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        redacted.llm.anthropic_api_key = None;
        redacted.llm.openai_api_key = None;
        redacted.literature.ncbi_api_key = None;
        toml::to_string_pretty(&redacted).map_err(|e| EweError::Serialization(e.to_string()))
    }
}

/// Find ewe.toml in current or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
