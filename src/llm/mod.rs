//! Provider access and commit message synthesis.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod synthesizer;

pub use client::{CompletionClient, HttpCompletionClient};
pub use prompt::build_commit_prompt;
pub use provider::Provider;
pub use synthesizer::{
    MessageSource, MessageSynthesizer, ProviderWarning, Synthesis, SynthesisState,
};
