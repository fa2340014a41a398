//! Defaulting and clamping for the untrusted option strings supplied by the
//! host configuration. These never fail; a bad value becomes the default.

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Host-supplied options, all untrusted strings until normalized.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub api_key: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub temperature: Option<String>,
    pub max_tokens: Option<String>,
    pub response_handling: ResponseMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseMode {
    #[default]
    Append,
    Replace,
    Copy,
    Show,
}

impl ResponseMode {
    /// Lossy parse: anything outside the known set degrades to `Append`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "replace" => ResponseMode::Replace,
            "copy" => ResponseMode::Copy,
            "show" => ResponseMode::Show,
            _ => ResponseMode::Append,
        }
    }
}

pub fn normalize_temperature(raw: Option<&str>) -> f32 {
    let t = raw
        .and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(DEFAULT_TEMPERATURE);
    t.clamp(0.0, 2.0)
}

pub fn normalize_max_tokens(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}
