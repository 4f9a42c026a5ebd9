//! ArchitectureSpec - the structured output of the architect model.

use crate::transport::Schema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply treated as the model's answer when it sent no text
const EMPTY_REPLY: &str = "{}";

#[derive(Error, Debug)]
pub enum MalformedReply {
    #[error("reply is not a valid architecture object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reply has an empty projectName")]
    EmptyProjectName,
}

/// A component the architecture calls out by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyComponent {
    pub name: String,
    pub purpose: String,
}

/// Project architecture proposed by the model.
///
/// Every field is mandatory on the wire; a reply missing any of them is rejected
/// as a whole rather than returned partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSpec {
    pub project_name: String,
    pub description: String,
    /// Relative paths, top of the tree first
    pub folder_structure: Vec<String>,
    pub tech_stack: Vec<String>,
    pub key_components: Vec<KeyComponent>,
}

impl ArchitectureSpec {
    /// Schema declaration sent with every architecture request
    pub fn response_schema() -> Schema {
        let component = Schema::object()
            .property("name", Schema::string())
            .property("purpose", Schema::string())
            .all_required();

        Schema::object()
            .property("projectName", Schema::string())
            .property("description", Schema::string())
            .property("folderStructure", Schema::array(Schema::string()))
            .property("techStack", Schema::array(Schema::string()))
            .property("keyComponents", Schema::array(component))
            .all_required()
    }

    /// Parse the model's reply text.
    ///
    /// An absent or blank reply is read as `{}`, which then fails the required fields.
    pub fn from_reply(reply: Option<&str>) -> Result<Self, MalformedReply> {
        let text = reply
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(EMPTY_REPLY);

        let spec: ArchitectureSpec = serde_json::from_str(strip_markdown_json(text))?;
        if spec.project_name.trim().is_empty() {
            return Err(MalformedReply::EmptyProjectName);
        }
        Ok(spec)
    }

    /// Folder structure drawn as a tree listing, one path per line
    pub fn render_tree(&self) -> String {
        let last = self.folder_structure.len().saturating_sub(1);
        self.folder_structure
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let branch = if idx == last { "└─" } else { "├─" };
                format!("{} {}", branch, path)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strip a markdown code fence some models wrap around JSON
fn strip_markdown_json(text: &str) -> &str {
    let Some(without_prefix) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    match without_prefix.rfind("```") {
        Some(end_idx) => without_prefix[..end_idx].trim(),
        None => text,
    }
}
