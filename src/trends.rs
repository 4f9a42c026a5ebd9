//! TrendDigest - narrative plus the web sources a grounded reply cited.

use crate::transport::{GenerateContentResponse, GroundingChunk};
use serde::{Deserialize, Serialize};

/// Title used when a grounding chunk names no title
pub const PLACEHOLDER_TITLE: &str = "External Resource";
/// Link used when a grounding chunk names no uri
pub const PLACEHOLDER_URI: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

impl Source {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

impl From<&GroundingChunk> for Source {
    fn from(chunk: &GroundingChunk) -> Self {
        let web = chunk.web.as_ref();
        let pick = |value: Option<&String>, placeholder: &str| {
            value
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| placeholder.to_string())
        };

        Self {
            title: pick(web.and_then(|w| w.title.as_ref()), PLACEHOLDER_TITLE),
            uri: pick(web.and_then(|w| w.uri.as_ref()), PLACEHOLDER_URI),
        }
    }
}

/// Trend narrative returned by the grounded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDigest {
    /// Narrative text, verbatim; `None` if the model sent none
    pub text: Option<String>,
    /// One entry per grounding chunk, in reply order, duplicates kept
    pub sources: Vec<Source>,
}

impl TrendDigest {
    pub fn from_response(response: &GenerateContentResponse) -> Self {
        let sources = response
            .grounding_chunks()
            .map(|chunks| chunks.iter().map(Source::from).collect())
            .unwrap_or_default();

        Self {
            text: response.text(),
            sources,
        }
    }
}
