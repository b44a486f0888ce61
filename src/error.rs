//! Error handling for the Touchbase client
//!
//! Every failure crossing a component boundary is one of the closed set of
//! variants below, carrying a ready-to-display message. HTTP responses are
//! classified exactly once, here, at the point where the response body is
//! first inspected; downstream code matches on the variant tag.

use serde_json::Value;
use thiserror::Error;

/// Unified error type for the Touchbase client
#[derive(Error, Debug)]
pub enum Error {
    /// The user aborted the identity-provider flow; informational, not a failure
    #[error("Sign in was cancelled")]
    Cancelled,

    /// The identity provider's required platform service is missing
    #[error("{0}")]
    ProviderUnavailable(String),

    /// Unclassified identity-provider failure
    #[error("{0}")]
    Provider(String),

    /// The provider completed sign-in but returned no identity token
    #[error("Failed to get authentication token from the identity provider")]
    MissingProviderToken,

    /// A sign-in attempt is already in flight
    #[error("Sign in is already in progress")]
    SignInInProgress,

    /// The backend rejected the token exchange
    #[error("{message}")]
    AuthExchange { status: u16, message: String },

    /// Transport failure, no HTTP response received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A protected operation was invoked with no session token
    #[error("No authentication token found")]
    NotAuthenticated,

    /// The server returned 404 for the requested record
    #[error("{0}")]
    NotFound(String),

    /// The server returned 422 with field-level messages
    #[error("{0}")]
    Validation(String),

    /// The server returned 429
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    /// The server returned 500
    #[error("Server error. Please try again later.")]
    Server,

    /// Any other non-2xx response
    #[error("{message}")]
    UnknownHttp { status: u16, message: String },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

fn error_field(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}

fn joined_strings(body: &Value, key: &str) -> Option<String> {
    let items = body.get(key)?.as_array()?;
    let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Classify a non-2xx response from the `/auth/google` token exchange.
///
/// Known `error` substrings are mapped to distinct user-facing messages;
/// anything unrecognized falls back to a generic "(status): detail" form.
pub(crate) fn classify_auth_exchange(status: u16, body: &Value) -> Error {
    let detail = error_field(body).unwrap_or("");

    let message = match status {
        400 => {
            if detail.contains("Missing auth parameter") {
                "Authentication request malformed".to_string()
            } else if detail.contains("Missing ID token") {
                "Google authentication incomplete".to_string()
            } else if detail.is_empty() {
                "Bad request: Unknown error".to_string()
            } else {
                format!("Bad request: {}", detail)
            }
        }
        401 => {
            if detail.contains("Invalid or expired token") {
                "Google authentication expired. Please try again.".to_string()
            } else if detail.contains("Email not verified") {
                "Please verify your email with Google and try again.".to_string()
            } else if detail.contains("Invalid token payload") {
                "Google authentication is invalid. Please try again.".to_string()
            } else if detail.is_empty() {
                "Authentication failed: Unauthorized".to_string()
            } else {
                format!("Authentication failed: {}", detail)
            }
        }
        409 => "Account already exists with different authentication method.".to_string(),
        422 => {
            let details = joined_strings(body, "details")
                .or_else(|| error_field(body).map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            format!("Account validation failed: {}", details)
        }
        500 => {
            if detail.contains("service unavailable") {
                "Authentication service is temporarily unavailable. Please try again later."
                    .to_string()
            } else if detail.contains("Token generation failed") {
                "Failed to generate authentication token. Please try again.".to_string()
            } else {
                "Server error occurred. Please try again later.".to_string()
            }
        }
        _ => {
            let detail = if detail.is_empty() { "Unknown error" } else { detail };
            format!("Authentication failed ({}): {}", status, detail)
        }
    };

    Error::AuthExchange { status, message }
}

/// Classify a non-2xx response from a resource collection endpoint.
///
/// `label` is the human name of the record kind ("Friend", "Connection");
/// `operation` names the attempted call for the fallback message.
pub(crate) fn classify_resource(status: u16, body: &Value, label: &str, operation: &str) -> Error {
    match status {
        401 => Error::AuthExchange {
            status,
            message: "Authentication required. Please log in again.".to_string(),
        },
        404 => Error::NotFound(format!("{} not found.", label)),
        422 => {
            let message = joined_strings(body, "errors")
                .unwrap_or_else(|| format!("Invalid {} data provided.", label.to_lowercase()));
            Error::Validation(message)
        }
        429 => Error::RateLimited,
        500 => Error::Server,
        _ => {
            let message = error_field(body)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to {}. Please try again.", operation));
            Error::UnknownHttp { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_exchange_maps_known_401_details() {
        let err = classify_auth_exchange(401, &json!({"error": "Invalid or expired token"}));
        assert_eq!(
            err.to_string(),
            "Google authentication expired. Please try again."
        );

        let err = classify_auth_exchange(401, &json!({"error": "Email not verified"}));
        assert_eq!(
            err.to_string(),
            "Please verify your email with Google and try again."
        );
    }

    #[test]
    fn auth_exchange_falls_back_to_status_and_detail() {
        let err = classify_auth_exchange(418, &json!({"error": "teapot"}));
        assert!(matches!(err, Error::AuthExchange { status: 418, .. }));
        assert_eq!(err.to_string(), "Authentication failed (418): teapot");
    }

    #[test]
    fn auth_exchange_joins_422_details() {
        let body = json!({"details": ["Email is invalid", "Name can't be blank"]});
        let err = classify_auth_exchange(422, &body);
        assert_eq!(
            err.to_string(),
            "Account validation failed: Email is invalid, Name can't be blank"
        );
    }

    #[test]
    fn resource_422_joins_error_messages() {
        let body = json!({"errors": ["Name can't be blank", "Phone is invalid"]});
        let err = classify_resource(422, &body, "Friend", "create friend");
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Name can't be blank, Phone is invalid");
    }

    #[test]
    fn resource_422_without_messages_uses_label() {
        let err = classify_resource(422, &json!({}), "Connection", "update connection");
        assert_eq!(err.to_string(), "Invalid connection data provided.");
    }

    #[test]
    fn resource_404_names_the_record_kind() {
        let err = classify_resource(404, &json!({}), "Friend", "fetch friend");
        assert_eq!(err.to_string(), "Friend not found.");
    }

    #[test]
    fn resource_fallback_prefers_server_error_text() {
        let err = classify_resource(503, &json!({"error": "maintenance"}), "Friend", "list friends");
        assert_eq!(err.to_string(), "maintenance");

        let err = classify_resource(503, &json!({}), "Friend", "list friends");
        assert_eq!(err.to_string(), "Failed to list friends. Please try again.");
    }
}
