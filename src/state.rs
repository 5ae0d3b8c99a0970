use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, Secrets};
use crate::cors::CorsPolicy;
use crate::translate::interface::TranslatorInterface;
use crate::translate::openrouter::OpenRouterTranslator;

/// Shared, immutable per-process state. Every request gets a clone; nothing
/// here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cors: Arc<CorsPolicy>,
    pub secrets: Arc<Secrets>,
    pub translator: Arc<dyn TranslatorInterface>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let secrets = Secrets::from_env()?;
        let translator = OpenRouterTranslator::new(
            config.upstream.clone(),
            secrets.translate_api_key.clone(),
        );
        Ok(Self::with_translator(config, secrets, Arc::new(translator)))
    }

    /// Build state around an explicit translator (used by tests to swap in
    /// a mock upstream).
    pub fn with_translator(
        config: Config,
        secrets: Secrets,
        translator: Arc<dyn TranslatorInterface>,
    ) -> Self {
        Self {
            cors: Arc::new(CorsPolicy::new(&config.cors)),
            config: Arc::new(config),
            secrets: Arc::new(secrets),
            translator,
        }
    }
}
