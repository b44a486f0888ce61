//! Identity provider contract
//!
//! The third-party sign-in SDK (Google on the shipped app) is an external
//! collaborator; its internal protocol is out of scope. This module pins
//! down the only contract the session manager needs from it: a sign-in that
//! either yields a provider identity, reports cancellation, or fails; a
//! best-effort probe for an already-active provider session; and a sign-out.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::Error;

/// Transient output of one provider sign-in attempt.
///
/// Consumed immediately by the backend token exchange and discarded; never
/// stored.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// The provider's own user id
    pub provider_user_id: String,

    /// Display name, if the provider shared one
    pub name: Option<String>,

    /// Email address
    pub email: String,

    /// Avatar URL, if the provider shared one
    pub photo_url: Option<String>,

    /// Opaque identity token to exchange with the backend.
    ///
    /// Providers have been observed to complete sign-in without issuing a
    /// token; the session manager treats that as `MissingProviderToken`.
    pub identity_token: Option<String>,
}

/// Outcome of an interactive provider sign-in
#[derive(Debug, Clone)]
pub enum ProviderFlow {
    /// The user completed the flow
    Completed(ProviderIdentity),

    /// The user dismissed the flow; not an error
    Cancelled,
}

/// Errors surfaced by an identity provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The platform service the provider depends on is missing
    #[error("{0}")]
    Unavailable(String),

    /// Anything else the provider reports
    #[error("{0}")]
    Failed(String),
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(detail) => Error::ProviderUnavailable(detail),
            ProviderError::Failed(_) => {
                Error::Provider("Something went wrong during sign-in".to_string())
            }
        }
    }
}

/// Contract the session manager requires from a sign-in provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive sign-in flow
    async fn sign_in(&self) -> Result<ProviderFlow, ProviderError>;

    /// Return the provider-side identity that is already signed in, if any.
    ///
    /// Used by session restore as a best-effort probe; failures are treated
    /// as "no identity".
    async fn current_identity(&self) -> Option<ProviderIdentity>;

    /// Sign out on the provider side
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
