//! Gemini agent: schema-constrained architecture generation and grounded trend digests.
//!
//! Both calls are single requests over a [`Transport`]. Neither retries nor times out;
//! deadlines and retries belong to the caller.

pub use crate::architecture::ArchitectureSpec;
pub use crate::trends::TrendDigest;

use crate::architecture::MalformedReply;
use crate::config::Config;
use crate::transport::{GenerateContentRequest, HttpTransport, Transport, TransportError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed model reply: {0}")]
    ResultMalformed(#[from] MalformedReply),
}

/// Coarse failure category of an [`AgentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    ResultMalformed,
}

impl AgentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::Transport(_) => ErrorKind::TransportFailure,
            AgentError::ResultMalformed(_) => ErrorKind::ResultMalformed,
        }
    }
}

/// Client for the two Gemini-backed operations.
///
/// Built once from explicit configuration and held for as long as the caller needs it.
pub struct ArchLens<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl ArchLens<HttpTransport> {
    /// Build a client talking HTTP to the configured endpoint
    pub fn from_config(config: Config) -> Result<Self, AgentError> {
        let transport = HttpTransport::new(&config.gemini.endpoint, config.api_key())?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> ArchLens<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Ask the architect model for a project architecture.
    ///
    /// `prompt` is expected to be trimmed and non-empty already.
    pub async fn generate_architecture(&self, prompt: &str) -> Result<ArchitectureSpec, AgentError> {
        let gemini = &self.config.gemini;
        let request = GenerateContentRequest::prompt(self.config.architecture_prompt(prompt))
            .with_response_schema(ArchitectureSpec::response_schema())
            .with_thinking_budget(gemini.thinking_budget);

        debug!(model = %gemini.architect_model, "requesting architecture");
        let response = self
            .transport
            .generate(&gemini.architect_model, &request)
            .await
            .inspect_err(|e| warn!(error = %e, "architecture request failed"))?;

        let reply = response.text();
        ArchitectureSpec::from_reply(reply.as_deref())
            .inspect_err(|e| warn!(error = %e, "architecture reply rejected"))
            .map_err(AgentError::from)
    }

    /// Ask the search-grounded model for current ecosystem trends
    pub async fn fetch_trends(&self) -> Result<TrendDigest, AgentError> {
        let gemini = &self.config.gemini;
        let request =
            GenerateContentRequest::prompt(self.config.prompts.trends_query.as_str())
                .with_google_search();

        debug!(model = %gemini.trends_model, "requesting trend digest");
        let response = self
            .transport
            .generate(&gemini.trends_model, &request)
            .await
            .inspect_err(|e| warn!(error = %e, "trend request failed"))?;

        let digest = TrendDigest::from_response(&response);
        debug!(sources = digest.sources.len(), "trend digest received");
        Ok(digest)
    }
}
