//! # Project Listings
//!
//! Read-only portfolio entries. Their lifecycle belongs to whoever seeds the
//! store; the application only lists them.

use serde::{Deserialize, Serialize};

/// One portfolio project as served by `GET /api/projects`.
///
/// `title` is the rendering key. `github` and `live` are omitted from the
/// JSON body when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectListing {
    pub title: String,
    pub description: String,
    /// Ordered as authored.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_links_are_omitted() {
        let project = ProjectListing {
            title: "Folio".into(),
            description: "Portfolio site".into(),
            technologies: vec!["Rust".into(), "Axum".into()],
            github: Some("https://github.com/Miren3865/folio".into()),
            live: None,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["github"], "https://github.com/Miren3865/folio");
        assert!(json.get("live").is_none());
        assert_eq!(json["technologies"], serde_json::json!(["Rust", "Axum"]));
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let project: ProjectListing = serde_json::from_value(serde_json::json!({
            "title": "Chat",
            "description": "Realtime chat"
        }))
        .unwrap();
        assert!(project.technologies.is_empty());
        assert_eq!(project.github, None);
        assert_eq!(project.live, None);
    }
}
