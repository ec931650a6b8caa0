use serde::{Deserialize, Serialize};

/// A captured note, in the client's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    /// Creation time, Unix milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_processing: Option<bool>,
}

impl Note {
    pub fn tags(&self) -> &[String] {
        self.ai_analysis
            .as_ref()
            .map(|a| a.tags.as_slice())
            .unwrap_or_default()
    }

    pub fn is_todo(&self) -> bool {
        self.ai_analysis.as_ref().is_some_and(|a| a.is_todo)
    }
}

/// Metadata the classifier attaches to a note.
///
/// Every field defaults, so partial model output still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_todo: bool,
    #[serde(default)]
    pub is_resource: bool,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Read,
    Watch,
    Listen,
    Code,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_wire_shape() {
        let raw = json!({
            "id": "n1",
            "content": "read SICP",
            "timestamp": 1760000000000i64,
            "aiAnalysis": {
                "tags": ["reading"],
                "isTodo": true,
                "isResource": true,
                "resourceType": "read"
            }
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.tags(), ["reading".to_string()]);
        assert!(note.is_todo());
        assert_eq!(
            note.ai_analysis.as_ref().unwrap().resource_type,
            Some(ResourceType::Read)
        );

        let back = serde_json::to_value(&note).unwrap();
        assert_eq!(back["aiAnalysis"]["isResource"], json!(true));
        assert!(back.get("isProcessing").is_none());
    }

    #[test]
    fn test_analysis_defaults() {
        let analysis: AiAnalysis = serde_json::from_str(r#"{"tags":["idea"]}"#).unwrap();
        assert_eq!(analysis.tags, vec!["idea".to_string()]);
        assert!(!analysis.is_todo);
        assert!(analysis.resource_type.is_none());

        let fallback = serde_json::to_value(AiAnalysis::default()).unwrap();
        assert_eq!(
            fallback,
            json!({"tags": [], "isTodo": false, "isResource": false, "resourceType": null})
        );
    }

    #[test]
    fn test_note_without_analysis() {
        let note: Note =
            serde_json::from_str(r#"{"id":"n2","content":"hi","timestamp":1}"#).unwrap();
        assert!(note.tags().is_empty());
        assert!(!note.is_todo());
    }
}
