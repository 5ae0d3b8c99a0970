use async_trait::async_trait;

use crate::error::GatewayError;

/// Abstraction over the chat-completion service that performs the actual
/// translation.
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Translate `text` into `target_lang`.
    ///
    /// `Ok(None)` means the upstream answered successfully but produced no
    /// usable translation; the caller decides how to degrade.
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<Option<String>, GatewayError>;
}
