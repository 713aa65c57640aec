use serde::Deserialize;
use serde::de::IgnoredAny;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("unknown move '{0}'")]
    UnknownMove(String),
}

/// Error payload any endpoint may return alongside a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    /// Request validation failures arrive as a list of issues
    Issues(Vec<ValidationIssue>),
    Other(IgnoredAny),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
}

impl ErrorBody {
    /// First non-empty of `detail` then `message`.
    pub fn user_message(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(ErrorDetail::Text(text)) if !text.is_empty() => Some(text.clone()),
            Some(ErrorDetail::Issues(issues)) => {
                let joined = issues
                    .iter()
                    .map(|issue| issue.msg.as_str())
                    .filter(|msg| !msg.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        };

        detail.or_else(|| self.message.clone().filter(|m| !m.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ErrorBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_detail_preferred_over_message() {
        let body = parse(r#"{"detail": "Bad move", "message": "ignored"}"#);
        assert_eq!(body.user_message().as_deref(), Some("Bad move"));
    }

    #[test]
    fn test_message_used_when_detail_missing_or_empty() {
        let body = parse(r#"{"message": "Service unavailable"}"#);
        assert_eq!(body.user_message().as_deref(), Some("Service unavailable"));

        let body = parse(r#"{"detail": "", "message": "Service unavailable"}"#);
        assert_eq!(body.user_message().as_deref(), Some("Service unavailable"));
    }

    #[test]
    fn test_validation_issue_list() {
        let body = parse(
            r#"{"detail": [
                {"loc": ["body", "user_message"], "msg": "String should have at most 500 characters", "type": "string_too_long"},
                {"loc": ["body"], "msg": "", "type": "x"}
            ]}"#,
        );
        assert_eq!(
            body.user_message().as_deref(),
            Some("String should have at most 500 characters")
        );
    }

    #[test]
    fn test_unrecognised_detail_falls_through() {
        let body = parse(r#"{"detail": 42, "message": "Too many requests"}"#);
        assert_eq!(body.user_message().as_deref(), Some("Too many requests"));

        let body = parse(r#"{"error": "nope"}"#);
        assert_eq!(body.user_message(), None);
    }
}
