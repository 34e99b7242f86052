// File: ./src/client/error.rs
use http::StatusCode;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a response was read.
    Transport(String),
    /// Non-2xx response. `message` is the server's `message` field, if any.
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    /// The payload did not match the expected shape.
    InvalidData(String),
    InvalidUrl(String),
}

impl ApiError {
    pub fn from_error_body(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty());
        ApiError::Server { status, message }
    }

    /// The message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                message: Some(m), ..
            } => Some(m),
            _ => None,
        }
    }

    /// Text to show to the user: the server's message, then the error's own
    /// description, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(m) = self.server_message() {
            return m.to_string();
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            fallback.to_string()
        } else {
            own
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "{}", msg),
            ApiError::Server { status, message } => match message {
                Some(m) => write!(f, "{}", m),
                None => write!(f, "Request failed with status code {}", status.as_u16()),
            },
            ApiError::InvalidData(msg) => write!(f, "{}", msg),
            ApiError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_precedence() {
        let with_msg = ApiError::from_error_body(StatusCode::UNAUTHORIZED, br#"{"message":"Invalid token"}"#);
        assert_eq!(with_msg.user_message("fallback"), "Invalid token");

        let no_msg = ApiError::from_error_body(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(no_msg.server_message(), None);
        assert_eq!(
            no_msg.user_message("fallback"),
            "Request failed with status code 500"
        );

        let blank = ApiError::Transport(String::new());
        assert_eq!(blank.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_non_string_message_ignored() {
        let err = ApiError::from_error_body(StatusCode::BAD_REQUEST, br#"{"message": 42}"#);
        assert_eq!(err.server_message(), None);
    }
}
