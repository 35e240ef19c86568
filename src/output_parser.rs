//! Structured-output parsing for model responses.
//!
//! The prompts contract the model into minimized JSON: one object for
//! templatizing, an array of objects for post batches. Parsing is strict
//! `serde_json` deserialization of that literal shape — never evaluation
//! of the model text, never permissive coercion. Anything else (prose
//! wrapping, code fences, extra keys, non-string values, trailing text)
//! is rejected as [`Error::MalformedOutput`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One generated piece of content: a short title plus the post body.
///
/// Shared by templates and generated posts — the two differ only in the
/// status tag they are stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostContent {
    pub title: String,
    pub post: String,
}

/// Parse a single `{"title": .., "post": ..}` object.
pub fn parse_object(text: &str) -> Result<PostContent> {
    serde_json::from_str(text.trim()).map_err(|e| Error::MalformedOutput(e.to_string()))
}

/// Parse an array of `{"title": .., "post": ..}` objects. An empty array
/// is valid.
pub fn parse_array(text: &str) -> Result<Vec<PostContent>> {
    serde_json::from_str(text.trim()).map_err(|e| Error::MalformedOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimized_object() {
        let parsed = parse_object(r#"{"title":"A","post":"B"}"#).unwrap();
        assert_eq!(
            parsed,
            PostContent {
                title: "A".to_string(),
                post: "B".to_string(),
            }
        );
    }

    #[test]
    fn parses_array_in_input_order() {
        let parsed =
            parse_array(r#"[{"title":"A","post":"B"},{"title":"C","post":"D"}]"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "A");
        assert_eq!(parsed[1].title, "C");
    }

    #[test]
    fn empty_array_is_valid() {
        assert_eq!(parse_array("[]").unwrap(), Vec::new());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let parsed = parse_object("  {\"title\":\"A\",\"post\":\"B\"}\n").unwrap();
        assert_eq!(parsed.title, "A");
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_object("not json"),
            Err(Error::MalformedOutput(_))
        ));
    }

    #[test]
    fn rejects_prose_wrapping_and_code_fences() {
        let fenced = "```json\n{\"title\":\"A\",\"post\":\"B\"}\n```";
        assert!(parse_object(fenced).is_err());
        let prose = "Here you go: {\"title\":\"A\",\"post\":\"B\"}";
        assert!(parse_object(prose).is_err());
    }

    #[test]
    fn rejects_extra_keys() {
        assert!(parse_object(r#"{"title":"A","post":"B","mood":"great"}"#).is_err());
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(parse_object(r#"{"title":1,"post":"B"}"#).is_err());
        assert!(parse_array(r#"[{"title":"A","post":null}]"#).is_err());
    }

    #[test]
    fn rejects_object_where_array_expected() {
        assert!(parse_array(r#"{"title":"A","post":"B"}"#).is_err());
    }

    #[test]
    fn rejects_trailing_content() {
        assert!(parse_object(r#"{"title":"A","post":"B"} extra"#).is_err());
    }
}
