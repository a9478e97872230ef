use serde::{Deserialize, Serialize};

use crate::imaging::IMAGE_MIME;

/// `finishReason` value Gemini reports when generation is declined by the
/// content moderation layer.
pub const PROHIBITED_CONTENT: &str = "PROHIBITED_CONTENT";

/// Request body for the `generateContent` endpoint.
///
/// Outbound field casing is the provider's own mix: `generationConfig` is
/// camelCase while `system_instruction` and inline image parts are
/// snake_case.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Part of an outbound content block, either text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Wraps a base64 payload with the fixed outbound image mime type.
    pub fn inline_image(data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: IMAGE_MIME.to_string(),
                data: data.into(),
            },
        }
    }
}

/// Response body consumed from the `generateContent` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub response_id: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInlineData {
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_casing() {
        let request = GenerateContentRequest {
            generation_config: GenerationConfig { temperature: 1.0 },
            system_instruction: None,
            contents: vec![Content {
                parts: vec![Part::text("a corgi"), Part::inline_image("aGVsbG8=")],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("generationConfig").is_some());
        assert!(json.get("generation_config").is_none());
        assert!(json.get("system_instruction").is_none());

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "a corgi");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/webp");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
    }

    #[test]
    fn test_system_instruction_serialized_when_present() {
        let request = GenerateContentRequest {
            generation_config: GenerationConfig { temperature: 0.5 },
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::text("render in watercolor")],
            }),
            contents: vec![Content { parts: vec![] }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["system_instruction"]["parts"][0]["text"],
            "render in watercolor"
        );
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "responseId": "abc123",
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image."},
                        {"inlineData": {"mimeType": "image/png", "data": "aWJyZQ=="}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response_id.as_deref(), Some("abc123"));
        assert_eq!(response.candidates.len(), 1);

        let candidate = &response.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));

        let parts = &candidate.content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text.as_deref(), Some("Here is your image."));
        assert_eq!(parts[1].inline_data.as_ref().unwrap().data, "aWJyZQ==");
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.response_id.is_none());
        assert!(response.candidates.is_empty());

        let json = r#"{"candidates": [{"finishReason": "PROHIBITED_CONTENT"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some(PROHIBITED_CONTENT)
        );
        assert!(response.candidates[0].content.is_none());
    }
}
