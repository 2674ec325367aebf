use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Optional path to a catalog JSON file; the embedded seed is used when unset
    pub catalog_path: Option<PathBuf>,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Maximum concurrent generation calls (audit, blog, media)
    pub max_concurrent_generations: usize,
    /// Seconds between video operation polls
    pub video_poll_interval_secs: u64,
    /// Maximum video operation polls before giving up
    pub video_poll_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model used for discovery ranking (fast tier)
    pub rank_model: String,
    /// Model used for audits and blog generation (reasoning tier)
    pub content_model: String,
    /// Model used for image generation
    pub image_model: String,
    /// Model used for image editing
    pub edit_model: String,
    /// Model used for video generation
    pub video_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            catalog_path: None,
            llm: LlmConfig::default(),
            max_concurrent_generations: 3,
            video_poll_interval_secs: 5,
            video_poll_attempts: 60,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            rank_model: "gemini-3-flash-preview".to_string(),
            content_model: "gemini-3-pro-preview".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
            edit_model: "gemini-2.5-flash-image".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("SKILL_REGISTRY_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(path) = std::env::var("SKILL_REGISTRY_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Ok(val) = std::env::var("SKILL_REGISTRY_MAX_GENERATIONS") {
            if let Ok(v) = val.parse() {
                config.max_concurrent_generations = v;
            }
        }
        if let Ok(val) = std::env::var("SKILL_REGISTRY_VIDEO_POLL_SECS") {
            if let Ok(v) = val.parse() {
                config.video_poll_interval_secs = v;
            }
        }
        if let Ok(val) = std::env::var("SKILL_REGISTRY_VIDEO_POLL_ATTEMPTS") {
            if let Ok(v) = val.parse() {
                config.video_poll_attempts = v;
            }
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_RANK_MODEL") {
            config.llm.rank_model = model;
        }
        if let Ok(model) = std::env::var("LLM_CONTENT_MODEL") {
            config.llm.content_model = model;
        }
        if let Ok(model) = std::env::var("LLM_IMAGE_MODEL") {
            config.llm.image_model = model;
        }
        if let Ok(model) = std::env::var("LLM_EDIT_MODEL") {
            config.llm.edit_model = model;
        }
        if let Ok(model) = std::env::var("LLM_VIDEO_MODEL") {
            config.llm.video_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }

        config
    }
}
