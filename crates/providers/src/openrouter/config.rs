use directories::BaseDirs;
use serde::Deserialize;
use snip_core::options::{RequestOptions, ResponseMode};
use std::{env, fs, path::PathBuf, time::Duration};

#[derive(Clone, Debug, Deserialize)]
pub struct OpenRouterFileConfig {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    // Numeric knobs stay strings here; core::options owns defaulting/clamping.
    pub temperature: Option<String>,
    pub max_tokens: Option<String>,
    pub response_handling: Option<String>,
    pub timeout_ms: Option<u64>,
    pub referer: Option<String>,
    pub title: Option<String>,
}

#[derive(Clone, Debug)]
pub struct OpenRouterConfig {
    /// May be empty; the pipeline rejects an empty key before any network
    /// call, so loading config never fails on a missing key.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub temperature: Option<String>,
    pub max_tokens: Option<String>,
    pub response_handling: String,
    pub timeout: Duration,
    pub referer: String,
    pub title: String,
    pub proxy: Option<String>,
}

impl OpenRouterConfig {
    pub fn from_env_and_file() -> anyhow::Result<Self> {
        let api_key = env::var("OPENROUTER_API_KEY").unwrap_or_default();
        let base_url = env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        let mut model = "openrouter/auto".to_string();
        let mut system_prompt = None;
        let mut user_prompt = None;
        let mut temperature = None;
        let mut max_tokens = None;
        let mut response_handling = "append".to_string();
        let mut timeout_ms = 45_000u64;
        let mut referer = "https://github.com/snip-cli/snip".to_string();
        let mut title = "snip".to_string();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(raw) = fs::read_to_string(&path) {
                    if let Ok(file_cfg) = toml::from_str::<OpenRouterFileConfig>(&raw) {
                        if let Some(m) = file_cfg.model {
                            model = m;
                        }
                        system_prompt = file_cfg.system_prompt;
                        user_prompt = file_cfg.user_prompt;
                        temperature = file_cfg.temperature;
                        max_tokens = file_cfg.max_tokens;
                        if let Some(r) = file_cfg.response_handling {
                            response_handling = r;
                        }
                        if let Some(t) = file_cfg.timeout_ms {
                            timeout_ms = t;
                        }
                        if let Some(r) = file_cfg.referer {
                            referer = r;
                        }
                        if let Some(t) = file_cfg.title {
                            title = t;
                        }
                    }
                }
            }
        }

        let proxy = env::var("HTTPS_PROXY")
            .ok()
            .or_else(|| env::var("HTTP_PROXY").ok());

        Ok(OpenRouterConfig {
            api_key,
            base_url,
            model,
            system_prompt,
            user_prompt,
            temperature,
            max_tokens,
            response_handling,
            timeout: Duration::from_millis(timeout_ms),
            referer,
            title,
            proxy,
        })
    }

    /// The untrusted option bundle the pipeline consumes.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            temperature: self.temperature.clone(),
            max_tokens: self.max_tokens.clone(),
            response_handling: ResponseMode::parse(&self.response_handling),
        }
    }

    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let p = if cfg!(target_os = "windows") {
            base.home_dir().join(".snip").join("config.toml")
        } else {
            base.config_dir().join("snip").join("config.toml")
        };
        Some(p)
    }
}
