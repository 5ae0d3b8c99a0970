use serde::{Deserialize, Serialize};
use std::fs;
use anyhow::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub response_shape: ResponseShape,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to have themselves echoed back in
    /// `Access-Control-Allow-Origin`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Origin echoed back for requests whose origin is not allow-listed.
    #[serde(default = "default_origin")]
    pub default_origin: String,
    /// When true, preflight requests from origins outside the allow-list
    /// are answered with 403 instead of 204.
    #[serde(default)]
    pub reject_disallowed_preflight: bool,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://tauraronwasa.pages.dev".to_string(),
        "https://leadwaypeace.pages.dev".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

fn default_origin() -> String {
    "https://tauraronwasa.pages.dev".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sent as `HTTP-Referer`, identifies the calling application to the
    /// upstream provider.
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Sent as `X-Title`.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_referer() -> String {
    "https://tauraronwasa.pages.dev".to_string()
}

fn default_title() -> String {
    "TauraronWasa".to_string()
}

/// Shape of the success envelope. `Compat` duplicates the translation
/// under the historical key names some clients still read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    #[default]
    Minimal,
    Compat,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            default_origin: default_origin(),
            reject_disallowed_preflight: false,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }
}

/// Process-level secrets. Read from the environment, never from config
/// files, and kept out of Debug output.
#[derive(Clone)]
pub struct Secrets {
    /// Shared secret the caller must present in `x-api-key`.
    pub api_auth_key: String,
    /// Bearer credential for the upstream chat-completion API.
    pub translate_api_key: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_auth_key: std::env::var("API_AUTH_KEY")
                .map_err(|_| anyhow::anyhow!("API_AUTH_KEY is not set"))?,
            translate_api_key: std::env::var("TRANSLATE_API_KEY")
                .map_err(|_| anyhow::anyhow!("TRANSLATE_API_KEY is not set"))?,
        })
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("api_auth_key", &"<redacted>")
            .field("translate_api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_complete() {
        let config = Config::default();
        assert_eq!(config.system.port, 8787);
        assert_eq!(config.upstream.max_tokens, 2000);
        assert_eq!(config.upstream.model, "openai/gpt-4o-mini");
        assert_eq!(config.cors.allowed_origins.len(), 3);
        assert!(!config.cors.reject_disallowed_preflight);
        assert_eq!(config.response_shape, ResponseShape::Minimal);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = r#"
system:
  port: 9000
cors:
  default_origin: "https://example.com"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.system.port, 9000);
        assert_eq!(config.system.host, "0.0.0.0");
        assert_eq!(config.cors.default_origin, "https://example.com");
        assert_eq!(config.upstream.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn response_shape_parses_from_json() {
        let json = r#"{ "response_shape": "compat" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.response_shape, ResponseShape::Compat);
    }

    #[test]
    fn secrets_debug_is_redacted() {
        let secrets = Secrets {
            api_auth_key: "inbound".to_string(),
            translate_api_key: "upstream".to_string(),
        };
        let output = format!("{:?}", secrets);
        assert!(!output.contains("inbound"));
        assert!(!output.contains("upstream"));
    }
}
