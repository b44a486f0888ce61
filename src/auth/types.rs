//! Wire types for the backend token exchange

use serde::{Deserialize, Serialize};

/// The authenticated user as known to the backend.
///
/// Immutable once obtained from a sign-in exchange; the next sign-in
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend-assigned user id
    pub id: i64,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar URL, if the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Response body of `POST /auth/google`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque backend-issued session token
    pub token: String,

    /// The authenticated user
    pub user: Profile,
}

/// Outcome of a completed sign-in attempt.
///
/// Cancellation is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    /// The session is now active for this user
    SignedIn(Profile),

    /// The user dismissed the provider flow; the session is unchanged
    Cancelled,
}
