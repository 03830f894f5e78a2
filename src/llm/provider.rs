//! Text-generation provider descriptions.

use std::fmt;

use crate::error::ConfigError;

/// Model requested from every provider unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// An external text-generation backend.
///
/// Providers share the chat-completions request shape and differ by base URL,
/// credential variable, and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    /// Environment variable holding the API key.
    pub credential_env_var: String,
    pub model: String,
    pub base_url: String,
}

impl Provider {
    pub fn new(
        name: impl Into<String>,
        credential_env_var: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credential_env_var: credential_env_var.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.into(),
        }
    }

    pub fn openai() -> Self {
        Self::new("OpenAI", "OPENAI_API_KEY", OPENAI_BASE_URL)
    }

    pub fn openrouter() -> Self {
        Self::new("OpenRouter", "OPENROUTER_API_KEY", OPENROUTER_BASE_URL)
    }

    /// Built-in providers in default priority order.
    pub fn builtin() -> Vec<Provider> {
        vec![Provider::openai(), Provider::openrouter()]
    }

    /// Resolve a built-in provider by name (case-insensitive).
    pub fn lookup(name: &str) -> Result<Provider, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::openai()),
            "openrouter" => Ok(Provider::openrouter()),
            _ => Err(ConfigError::UnknownProvider(name.trim().to_string())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Chat-completions endpoint for this provider.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_is_openai_then_openrouter() {
        let names: Vec<String> = Provider::builtin().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["OpenAI", "OpenRouter"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Provider::lookup("OPENROUTER").unwrap(), Provider::openrouter());
        assert_eq!(Provider::lookup(" openai ").unwrap(), Provider::openai());
    }

    #[test]
    fn test_lookup_unknown_provider() {
        let err = Provider::lookup("Anthropic").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(ref n) if n == "Anthropic"));
    }

    #[test]
    fn test_completions_url_handles_trailing_slash() {
        let provider = Provider::openai().with_base_url("http://localhost:8000/v1/");
        assert_eq!(
            provider.completions_url(),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_credential_env_vars() {
        assert_eq!(Provider::openai().credential_env_var, "OPENAI_API_KEY");
        assert_eq!(Provider::openrouter().credential_env_var, "OPENROUTER_API_KEY");
    }
}
