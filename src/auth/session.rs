//! Session state owned by the session manager

use super::types::Profile;

/// Where the session currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No credentials held
    SignedOut,

    /// A sign-in attempt is in flight; a second attempt is rejected
    SigningIn,

    /// Token and profile are both present
    SignedIn,
}

/// Snapshot of the current session.
///
/// Invariant: `status == SignedIn` exactly when both `token` and `user` are
/// present. The only constructors are [`Session::empty`] and
/// [`Session::signed_in`], so the invariant holds by construction.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque backend session token
    pub token: Option<String>,

    /// The authenticated user
    pub user: Option<Profile>,

    /// Lifecycle status
    pub status: SessionStatus,
}

impl Session {
    /// A signed-out session holding nothing
    pub fn empty() -> Self {
        Self {
            token: None,
            user: None,
            status: SessionStatus::SignedOut,
        }
    }

    /// An active session for `user` authorized by `token`
    pub fn signed_in(token: String, user: Profile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            status: SessionStatus::SignedIn,
        }
    }

    /// Whether the session is active
    pub fn is_signed_in(&self) -> bool {
        self.status == SessionStatus::SignedIn
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}
