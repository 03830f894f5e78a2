//! Commit message synthesis with ordered provider fallback.
//!
//! Providers are tried one at a time in configured order. A provider without
//! a credential, or whose call fails, times out, or returns nothing, is
//! recorded as a warning and the next one is tried. When every provider has
//! been exhausted the message falls back to [`heuristic_message`], so
//! synthesis always produces a message.

use std::env;
use std::fmt;

use tokio::time::timeout;
use tracing::debug;

use crate::commit::heuristic::heuristic_message;
use crate::config::SynthesisConfig;
use crate::error::ProviderError;
use crate::llm::client::CompletionClient;
use crate::llm::prompt::build_commit_prompt;
use crate::llm::provider::Provider;

/// Where the final message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// Name of the provider that produced the message.
    Provider(String),
    Heuristic,
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSource::Provider(name) => f.write_str(name),
            MessageSource::Heuristic => f.write_str("heuristic"),
        }
    }
}

/// A recoverable provider failure, attributed to one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderWarning {
    MissingCredential { provider: String, env_var: String },
    CallFailed { provider: String, reason: String },
}

impl ProviderWarning {
    pub fn provider(&self) -> &str {
        match self {
            ProviderWarning::MissingCredential { provider, .. }
            | ProviderWarning::CallFailed { provider, .. } => provider,
        }
    }
}

impl fmt::Display for ProviderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderWarning::MissingCredential { provider, env_var } => {
                write!(f, "{}: {} not set; skipping", provider, env_var)
            }
            ProviderWarning::CallFailed { provider, reason } => {
                write!(f, "{}: AI generation failed: {}", provider, reason)
            }
        }
    }
}

/// Result of message synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// Non-empty commit message.
    pub message: String,
    pub source: MessageSource,
    /// Warnings in the order providers were attempted.
    pub warnings: Vec<ProviderWarning>,
}

/// Fallback state machine over the configured providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisState {
    /// Attempting the provider at this index.
    Trying(usize),
    /// No provider produced a message.
    Exhausted,
    Done(String, MessageSource),
}

/// Produces commit messages from diffs.
pub struct MessageSynthesizer<C> {
    config: SynthesisConfig,
    client: C,
}

impl<C: CompletionClient> MessageSynthesizer<C> {
    pub fn new(config: SynthesisConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Synthesize a commit message for `diff`.
    ///
    /// `staged_paths` feeds the heuristic fallback. Never fails.
    pub async fn synthesize(&self, diff: &str, staged_paths: &[String]) -> Synthesis {
        let prompt = build_commit_prompt(diff);
        debug!("Commit prompt length: {} chars", prompt.len());

        let mut warnings = Vec::new();
        let mut state = self.advance_from(None);

        loop {
            state = match state {
                SynthesisState::Trying(i) => {
                    let provider = &self.config.providers[i];
                    match self.attempt(provider, &prompt).await {
                        Ok(message) => SynthesisState::Done(
                            message,
                            MessageSource::Provider(provider.name.clone()),
                        ),
                        Err(warning) => {
                            debug!("Provider fallback: {}", warning);
                            warnings.push(warning);
                            self.advance_from(Some(i))
                        }
                    }
                }
                SynthesisState::Exhausted => {
                    debug!("All providers exhausted, using heuristic message");
                    SynthesisState::Done(heuristic_message(staged_paths), MessageSource::Heuristic)
                }
                SynthesisState::Done(message, source) => {
                    return Synthesis {
                        message,
                        source,
                        warnings,
                    };
                }
            };
        }
    }

    /// Next state after the provider at `current` (or before the first one).
    fn advance_from(&self, current: Option<usize>) -> SynthesisState {
        let next = current.map_or(0, |i| i + 1);
        if next < self.config.providers.len() {
            SynthesisState::Trying(next)
        } else {
            SynthesisState::Exhausted
        }
    }

    /// One bounded attempt against a single provider.
    async fn attempt(&self, provider: &Provider, prompt: &str) -> Result<String, ProviderWarning> {
        let api_key = credential(provider).map_err(|err| {
            debug!("{}: {}", provider, err);
            ProviderWarning::MissingCredential {
                provider: provider.name.clone(),
                env_var: provider.credential_env_var.clone(),
            }
        })?;

        let call_failed = |err: ProviderError| ProviderWarning::CallFailed {
            provider: provider.name.clone(),
            reason: err.to_string(),
        };

        let limit = self.config.timeout;
        let text = timeout(limit, self.client.complete(provider, &api_key, prompt))
            .await
            .map_err(|_| call_failed(ProviderError::Timeout(limit)))?
            .map_err(call_failed)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(call_failed(ProviderError::EmptyResponse));
        }
        Ok(text.to_string())
    }
}

/// Read a provider's API key; empty values count as missing.
fn credential(provider: &Provider) -> Result<String, ProviderError> {
    env::var(&provider.credential_env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderError::MissingCredential(provider.credential_env_var.clone()))
}
