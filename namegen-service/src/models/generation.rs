use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// Body of `POST /api/generate-name`.
///
/// Fields accept any JSON value. `null`, `false`, `0` and `""` read as not
/// given; other non-string values are kept as their JSON text.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    #[serde(default, deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub tech_stack: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub must_include: Option<String>,
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    };
    Ok(text)
}

impl GenerationRequest {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Tech stack, with an empty string treated as not given.
    pub fn tech_stack(&self) -> Option<&str> {
        non_empty(self.tech_stack.as_deref())
    }

    /// Terms the name must contain, with an empty string treated as not given.
    pub fn must_include(&self) -> Option<&str> {
        non_empty(self.must_include.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The name/description pair the model returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub name: String,
    pub description: String,
}

/// Success half of the response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerationRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn accepts_camel_case_fields() {
        let req = parse(r#"{"description":"a cli","techStack":"Rust","mustInclude":"cache"}"#);
        assert!(req.validate().is_ok());
        assert_eq!(req.description(), "a cli");
        assert_eq!(req.tech_stack(), Some("Rust"));
        assert_eq!(req.must_include(), Some("cache"));
    }

    #[test]
    fn missing_null_or_empty_description_fails_validation() {
        for body in [
            r#"{}"#,
            r#"{"description":null}"#,
            r#"{"description":"","techStack":"Go"}"#,
        ] {
            assert!(parse(body).validate().is_err(), "{} should be rejected", body);
        }
    }

    #[test]
    fn falsy_values_read_as_absent() {
        for body in [
            r#"{"description":false}"#,
            r#"{"description":0}"#,
            r#"{"description":0.0,"techStack":false}"#,
        ] {
            let req = parse(body);
            assert!(req.validate().is_err(), "{} should be rejected", body);
            assert_eq!(req.tech_stack(), None);
        }
    }

    #[test]
    fn non_string_values_keep_their_json_text() {
        let req = parse(r#"{"description":42,"techStack":true,"mustInclude":["a","b"]}"#);
        assert!(req.validate().is_ok());
        assert_eq!(req.description(), "42");
        assert_eq!(req.tech_stack(), Some("true"));
        assert_eq!(req.must_include(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn empty_optional_fields_read_as_absent() {
        let req = parse(r#"{"description":"x","techStack":"","mustInclude":""}"#);
        assert_eq!(req.tech_stack(), None);
        assert_eq!(req.must_include(), None);
    }

    #[test]
    fn envelope_wraps_data() {
        let body = serde_json::to_value(ApiResponse::ok(GenerationResult {
            name: "foo-bar".to_string(),
            description: "A tool for foo.".to_string(),
        }))
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "data": { "name": "foo-bar", "description": "A tool for foo." }
            })
        );
    }
}
