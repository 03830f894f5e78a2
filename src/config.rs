//! Synthesis configuration, resolved once from the environment at the call
//! boundary and passed down explicitly.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::llm::provider::Provider;

/// Default timeout for a single provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Comma-separated provider names in attempt order.
pub const PROVIDERS_ENV_VAR: &str = "BGIT_PROVIDERS";

/// Per-call timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "BGIT_AI_TIMEOUT";

/// Model override applied to every provider.
pub const MODEL_ENV_VAR: &str = "BGIT_MODEL";

/// Configuration threaded into the message synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Providers in attempt order.
    pub providers: Vec<Provider>,
    /// Upper bound for each provider call.
    pub timeout: Duration,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            providers: Provider::builtin(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SynthesisConfig {
    pub fn new(providers: Vec<Provider>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// Build the configuration from `BGIT_*` environment variables.
    ///
    /// - `BGIT_PROVIDERS`: provider order, e.g. `openrouter,openai`
    /// - `BGIT_AI_TIMEOUT`: seconds per provider call
    /// - `BGIT_MODEL`: model for every provider
    /// - `BGIT_<PROVIDER>_BASE_URL`: endpoint override per provider
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut providers = match env::var(PROVIDERS_ENV_VAR) {
            Ok(v) if !v.trim().is_empty() => v
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(Provider::lookup)
                .collect::<Result<Vec<_>, _>>()?,
            _ => Provider::builtin(),
        };

        let model = env::var(MODEL_ENV_VAR).ok().filter(|m| !m.trim().is_empty());
        for provider in &mut providers {
            if let Some(model) = &model {
                provider.model = model.trim().to_string();
            }
            if let Ok(url) = env::var(base_url_env_var(provider))
                && !url.trim().is_empty()
            {
                provider.base_url = url.trim().to_string();
            }
        }

        Ok(Self {
            providers,
            timeout: get_timeout(),
        })
    }
}

/// Name of the base-URL override variable, e.g. `BGIT_OPENROUTER_BASE_URL`.
pub fn base_url_env_var(provider: &Provider) -> String {
    format!("BGIT_{}_BASE_URL", provider.name.to_uppercase())
}

/// Get the configured timeout duration.
///
/// Logs a warning if the environment variable is set but contains an
/// invalid value (non-numeric or negative).
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
