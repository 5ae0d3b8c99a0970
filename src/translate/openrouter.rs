use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::interface::TranslatorInterface;
use crate::config::UpstreamConfig;
use crate::error::GatewayError;

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// Translator backed by an OpenRouter-style chat-completion endpoint.
pub struct OpenRouterTranslator {
    client: Client,
    config: UpstreamConfig,
    api_key: String,
}

impl OpenRouterTranslator {
    pub fn new(config: UpstreamConfig, api_key: String) -> Self {
        info!(
            "Initialized OpenRouter translator: model={}, base_url={}",
            config.model, config.base_url
        );
        Self {
            client: Client::new(),
            config,
            api_key,
        }
    }

    fn build_request(&self, text: &str, target_lang: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(target_lang),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        }
    }
}

fn system_prompt(target_lang: &str) -> String {
    format!(
        "You are a translator. Translate the following text into {target_lang}. \
         Maintain the original formatting, including line breaks and gaps. \
         If the target language is not supported, do not translate and respond \
         with the original text."
    )
}

/// Classify a raw upstream reply.
///
/// The body is parsed before the status is looked at: a non-JSON body is a
/// protocol error no matter what the status line said. A success status
/// with no extractable choice content is not an error; it yields `None`.
fn decode_response(status: u16, body: &str) -> Result<Option<String>, GatewayError> {
    let data: Value =
        serde_json::from_str(body).map_err(|_| GatewayError::UpstreamProtocol)?;

    if !(200..300).contains(&status) {
        let details = data.get("error").cloned().unwrap_or(data);
        return Err(GatewayError::Upstream { status, details });
    }

    let content = data
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(content)
}

#[async_trait]
impl TranslatorInterface for OpenRouterTranslator {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<Option<String>, GatewayError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = self.build_request(text, target_lang);

        debug!(
            "Requesting translation: target_lang={}, chars={}",
            target_lang,
            text.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = decode_response(status, &body);
        if matches!(result, Err(GatewayError::UpstreamProtocol)) {
            error!("Upstream returned non-JSON body ({} bytes)", body.len());
        }
        result
    }
}
