//! Configuration for the question-answering service
//!
//! Every section has a `Default`; [`QaConfig::from_env`] overlays values read
//! from the process environment once at startup. The only mandatory variable
//! is `PINECONE_API_KEY`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QaConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Vector search service configuration
    pub vector: VectorSearchConfig,
    /// Generation service configuration
    pub llm: LlmConfig,
    /// Retrieval knobs
    pub retrieval: RetrievalConfig,
    /// Failure policies and prompt settings
    pub generation: GenerationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Vector search service (Pinecone) configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct VectorSearchConfig {
    /// API key, required
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Index name
    pub index_name: String,
    /// Namespace searched inside the index
    pub namespace: String,
    /// Data-plane host; resolved through the control plane when absent
    pub index_host: Option<String>,
    /// Control-plane base URL
    pub control_url: String,
    /// Value of the `X-Pinecone-API-Version` header
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_name: "pakllama".to_string(),
            namespace: "__default__".to_string(),
            index_host: None,
            control_url: "https://api.pinecone.io".to_string(),
            api_version: "2025-01".to_string(),
            timeout_secs: 60,
        }
    }
}

// API keys are redacted.
impl std::fmt::Debug for VectorSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorSearchConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("namespace", &self.namespace)
            .field("index_host", &self.index_host)
            .field("control_url", &self.control_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Generation service (Gemini) configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; not validated at startup
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Passages retrieved when the request does not say (default: 7)
    pub default_top_k: usize,
    /// Largest `top_k` a request may ask for
    pub max_top_k: usize,
    /// What `/ask` answers when the vector service fails
    pub failure_mode: RetrievalFailureMode,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 7,
            max_top_k: 100,
            failure_mode: RetrievalFailureMode::NotFound,
        }
    }
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Name of the legal text, inserted in the prompt
    pub corpus_name: String,
    /// What `/ask` answers when the generation service fails
    pub failure_mode: GenerationFailureMode,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            corpus_name: "the Constitution of Pakistan".to_string(),
            failure_mode: GenerationFailureMode::Embed,
        }
    }
}

/// Handling of a failed generation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationFailureMode {
    /// Answer 200 with the failure described in the `answer` field
    #[default]
    Embed,
    /// Fail the request with 503
    Propagate,
}

impl FromStr for GenerationFailureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embed" => Ok(Self::Embed),
            "propagate" => Ok(Self::Propagate),
            other => Err(Error::Config(format!(
                "GENERATION_FAILURE_MODE must be `embed` or `propagate`, got `{other}`"
            ))),
        }
    }
}

/// Handling of a failed retrieval call in `/ask`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalFailureMode {
    /// Treat as zero passages (404, same as a genuine miss)
    #[default]
    NotFound,
    /// Fail the request with 502
    BadGateway,
}

impl FromStr for RetrievalFailureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" => Ok(Self::NotFound),
            "bad_gateway" => Ok(Self::BadGateway),
            other => Err(Error::Config(format!(
                "RETRIEVAL_FAILURE_MODE must be `not_found` or `bad_gateway`, got `{other}`"
            ))),
        }
    }
}

impl QaConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty and whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.vector.api_key = get("PINECONE_API_KEY")
            .ok_or_else(|| Error::Config("PINECONE_API_KEY is not set".to_string()))?;
        if let Some(v) = get("PINECONE_INDEX") {
            config.vector.index_name = v;
        }
        if let Some(v) = get("PINECONE_NAMESPACE") {
            config.vector.namespace = v;
        }
        config.vector.index_host = get("PINECONE_INDEX_HOST");
        if let Some(v) = get("PINECONE_CONTROL_URL") {
            config.vector.control_url = v;
        }
        if let Some(v) = get("PINECONE_API_VERSION") {
            config.vector.api_version = v;
        }

        config.llm.api_key = get("GOOGLE_API_KEY");
        if let Some(v) = get("GEMINI_MODEL") {
            config.llm.model = v;
        }
        if let Some(v) = get("GEMINI_BASE_URL") {
            config.llm.base_url = v;
        }

        if let Some(v) = get("HOST") {
            config.server.host = v;
        }
        if let Some(port) = parse_var::<u16>(&get, "PORT")? {
            config.server.port = port;
        }

        if let Some(secs) = parse_var::<u64>(&get, "REQUEST_TIMEOUT_SECS")? {
            config.vector.timeout_secs = secs;
            config.llm.timeout_secs = secs;
        }

        if let Some(k) = parse_var::<usize>(&get, "DEFAULT_TOP_K")? {
            config.retrieval.default_top_k = k;
        }
        if let Some(k) = parse_var::<usize>(&get, "MAX_TOP_K")? {
            config.retrieval.max_top_k = k;
        }
        if let Some(mode) = get("RETRIEVAL_FAILURE_MODE") {
            config.retrieval.failure_mode = mode.parse()?;
        }

        if let Some(v) = get("CORPUS_NAME") {
            config.generation.corpus_name = v;
        }
        if let Some(mode) = get("GENERATION_FAILURE_MODE") {
            config.generation.failure_mode = mode.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.retrieval.default_top_k == 0 {
            return Err(Error::Config("DEFAULT_TOP_K must be at least 1".to_string()));
        }
        if self.retrieval.max_top_k < self.retrieval.default_top_k {
            return Err(Error::Config(format!(
                "MAX_TOP_K ({}) must not be below DEFAULT_TOP_K ({})",
                self.retrieval.max_top_k, self.retrieval.default_top_k
            )));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} has an invalid value: `{raw}`"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_pinecone_key_is_fatal() {
        let err = QaConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "g")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("PINECONE_API_KEY"));

        let blank = QaConfig::from_lookup(lookup(&[("PINECONE_API_KEY", "   ")]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = QaConfig::from_lookup(lookup(&[("PINECONE_API_KEY", "pk")])).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.vector.index_name, "pakllama");
        assert_eq!(config.vector.namespace, "__default__");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.retrieval.default_top_k, 7);
        assert_eq!(config.retrieval.failure_mode, RetrievalFailureMode::NotFound);
        assert_eq!(config.generation.failure_mode, GenerationFailureMode::Embed);
    }

    #[test]
    fn test_overrides() {
        let config = QaConfig::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "pk"),
            ("PORT", "9100"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("GENERATION_FAILURE_MODE", "propagate"),
            ("RETRIEVAL_FAILURE_MODE", "BAD_GATEWAY"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.vector.timeout_secs, 5);
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.generation.failure_mode, GenerationFailureMode::Propagate);
        assert_eq!(config.retrieval.failure_mode, RetrievalFailureMode::BadGateway);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(QaConfig::from_lookup(lookup(&[("PINECONE_API_KEY", "pk"), ("PORT", "eighty")]))
            .is_err());
        assert!(QaConfig::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "pk"),
            ("GENERATION_FAILURE_MODE", "shrug"),
        ]))
        .is_err());
        assert!(QaConfig::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "pk"),
            ("DEFAULT_TOP_K", "0"),
        ]))
        .is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = QaConfig::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "pk-secret"),
            ("GOOGLE_API_KEY", "g-secret"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pk-secret"));
        assert!(!rendered.contains("g-secret"));
    }
}
