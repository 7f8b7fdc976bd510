use serde::Deserialize;
use thiserror::Error;

/// Everything an API call can fail with. Page handlers store the `Display`
/// form in the per-operation error slot, so each message is user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Local validation failure, raised before any request is issued.
    #[error("{0}")]
    Invalid(String),

    /// Non-2xx response with the message extracted from the backend payload.
    #[error("API Error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Network request failed. Please check your connection and try again.")]
    Network,

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Download failed: {0}")]
    Download(String),
}

const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Error body shape used by every backend endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<ErrorMessage>,
    #[allow(dead_code)]
    #[serde(default)]
    error: Option<String>,
}

/// The backend sends `message` as either a single string or a list of
/// validation messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiError {
    /// Builds the error for a non-2xx response. `http_status` is the status
    /// line; the payload's own `statusCode` wins when present. An empty or
    /// undecodable body falls back to a generic message.
    pub fn from_error_body(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => {
                let message = match payload.message {
                    Some(ErrorMessage::Many(parts)) => parts.join(", "),
                    Some(ErrorMessage::One(text)) if !text.is_empty() => text,
                    _ => UNKNOWN_ERROR.to_string(),
                };
                ApiError::Status {
                    status: payload.status_code.unwrap_or(http_status),
                    message,
                }
            }
            Err(_) => ApiError::Status {
                status: http_status,
                message: UNKNOWN_ERROR.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_message_arrays_with_comma_space() {
        let err = ApiError::from_error_body(
            400,
            r#"{"statusCode":400,"message":["a","b"],"error":"Bad Request"}"#,
        );
        let text = err.to_string();
        assert!(text.contains("a, b"));
        assert_eq!(text, "API Error 400: a, b");
    }

    #[test]
    fn uses_single_string_message_verbatim() {
        let err = ApiError::from_error_body(
            401,
            r#"{"statusCode":401,"message":"Unauthorized","error":"Unauthorized"}"#,
        );
        assert_eq!(err.to_string(), "API Error 401: Unauthorized");
    }

    #[test]
    fn payload_status_code_wins_over_http_status() {
        let err = ApiError::from_error_body(500, r#"{"statusCode":422,"message":"nope"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                message: "nope".into()
            }
        );
    }

    #[test]
    fn falls_back_when_body_is_not_json() {
        let err = ApiError::from_error_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "API Error 502: An unknown error occurred");
    }

    #[test]
    fn falls_back_when_message_is_empty() {
        let err = ApiError::from_error_body(400, r#"{"statusCode":400,"message":""}"#);
        assert_eq!(err.to_string(), "API Error 400: An unknown error occurred");
    }

    #[test]
    fn invalid_displays_its_message_alone() {
        let err = ApiError::Invalid("Missing job description".into());
        assert_eq!(err.to_string(), "Missing job description");
    }
}
