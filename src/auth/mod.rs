//! Session lifecycle: sign-in, sign-out, restoration, token access
//!
//! The [`SessionManager`] is the sole owner of session state. Every
//! transition goes through it: the provider flow and backend exchange on
//! sign-in, the store reads on restore, the unconditional teardown on
//! sign-out. Resource clients observe the session through accessors and
//! never mutate it.

mod session;
mod types;

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use reqwest::Client;
use serde_json::json;

use crate::error::{classify_auth_exchange, Error};
use crate::fetch::Fetch;
use crate::provider::{IdentityProvider, ProviderFlow};
use crate::store::{MemoryStore, JWT_TOKEN_KEY, USER_DATA_KEY};

pub use session::{Session, SessionStatus};
pub use types::{AuthResponse, Profile, SignInOutcome};

struct Inner {
    base_url: String,
    client: Client,
    provider: Arc<dyn IdentityProvider>,
    store: MemoryStore,
    session: Mutex<Session>,
}

/// Owner of the session; mediates every state transition.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Create a session manager with an empty session
    pub(crate) fn new(base_url: &str, client: Client, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url: base_url.to_string(),
                client,
                provider,
                store: MemoryStore::new(),
                session: Mutex::new(Session::empty()),
            }),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.inner.base_url, path)
    }

    /// Restore a session from the store, called once at startup.
    ///
    /// If both token and profile are present the session becomes active
    /// without a backend round-trip; token validity is only discovered on
    /// the first protected call. A stored profile that fails to parse is
    /// discarded together with the token, failing safe toward signed-out.
    ///
    /// Returns whether a session was restored.
    pub async fn restore(&self) -> bool {
        let token = self.inner.store.get(JWT_TOKEN_KEY);
        let raw_user = self.inner.store.get(USER_DATA_KEY);

        if let (Some(token), Some(raw_user)) = (token, raw_user) {
            match serde_json::from_str::<Profile>(&raw_user) {
                Ok(user) => {
                    debug!("restored session for {}", user.email);
                    let mut session = self.inner.session.lock().unwrap();
                    *session = Session::signed_in(token, user);
                    return true;
                }
                Err(err) => {
                    warn!("stored profile unreadable, discarding credentials: {}", err);
                    self.invalidate();
                    return false;
                }
            }
        }

        // Nothing stored; probe the provider for an already-active identity.
        // Best-effort only, a failure here is not surfaced.
        if let Some(identity) = self.inner.provider.current_identity().await {
            debug!("provider reports an active identity: {}", identity.email);
        }
        false
    }

    /// Run the full sign-in sequence: provider flow, token exchange,
    /// persistence.
    ///
    /// Single-flight: a second call while one is in flight fails with
    /// [`Error::SignInInProgress`] and leaves the in-flight attempt
    /// untouched. Cancellation by the user is reported as
    /// [`SignInOutcome::Cancelled`], not as an error, and leaves whatever
    /// session existed before the attempt in place. Any failure signs out
    /// and discards stored credentials, so state and store never disagree.
    pub async fn sign_in(&self) -> Result<SignInOutcome, Error> {
        let previous = {
            let mut session = self.inner.session.lock().unwrap();
            if session.status == SessionStatus::SigningIn {
                return Err(Error::SignInInProgress);
            }
            let snapshot = session.clone();
            session.status = SessionStatus::SigningIn;
            snapshot
        };

        match self.run_sign_in().await {
            Ok(Some(auth)) => {
                debug!("signed in as {}", auth.user.email);
                let mut session = self.inner.session.lock().unwrap();
                *session = Session::signed_in(auth.token, auth.user.clone());
                Ok(SignInOutcome::SignedIn(auth.user))
            }
            Ok(None) => {
                debug!("sign-in cancelled by user");
                let mut session = self.inner.session.lock().unwrap();
                *session = previous;
                Ok(SignInOutcome::Cancelled)
            }
            Err(err) => {
                warn!("sign-in failed: {}", err);
                self.invalidate();
                Err(err)
            }
        }
    }

    /// The sequential body of a sign-in attempt. `Ok(None)` means the user
    /// cancelled.
    async fn run_sign_in(&self) -> Result<Option<AuthResponse>, Error> {
        let identity = match self.inner.provider.sign_in().await? {
            ProviderFlow::Completed(identity) => identity,
            ProviderFlow::Cancelled => return Ok(None),
        };

        let id_token = identity
            .identity_token
            .ok_or(Error::MissingProviderToken)?;
        debug!("provider identity received for {}", identity.email);

        let auth = self.exchange(&id_token).await?;

        self.inner.store.set(JWT_TOKEN_KEY, &auth.token);
        self.inner
            .store
            .set(USER_DATA_KEY, &serde_json::to_string(&auth.user)?);

        Ok(Some(auth))
    }

    /// Exchange a provider identity token for a backend session token
    async fn exchange(&self, id_token: &str) -> Result<AuthResponse, Error> {
        let url = self.auth_url("/google");
        let body = json!({"auth": {"id_token": id_token}});

        Fetch::post(&self.inner.client, &url)
            .json(&body)?
            .execute(classify_auth_exchange)
            .await
    }

    /// Sign out unconditionally.
    ///
    /// The provider-side sign-out is best effort; local state is cleared
    /// whether or not it succeeds, so the client never keeps a half-valid
    /// session.
    pub async fn sign_out(&self) {
        if let Err(err) = self.inner.provider.sign_out().await {
            warn!("provider sign-out failed, clearing local state anyway: {}", err);
        }
        self.invalidate();
    }

    /// Clear the store and reset the session without a provider round-trip.
    ///
    /// Callers use this when a protected call after restore comes back 401,
    /// meaning the stored token is stale.
    pub fn invalidate(&self) {
        self.inner.store.clear();
        let mut session = self.inner.session.lock().unwrap();
        *session = Session::empty();
    }

    /// Ask the backend whether the current token is still accepted.
    ///
    /// A definite rejection (4xx) clears local session state. A transport
    /// failure leaves state untouched and surfaces [`Error::Network`].
    pub async fn verify(&self) -> Result<bool, Error> {
        let token = self.current_token().ok_or(Error::NotAuthenticated)?;
        let url = self.auth_url("/verify");

        let response = Fetch::get(&self.inner.client, &url)
            .bearer_auth(&token)
            .execute_raw()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            warn!("token rejected with {}, discarding credentials", status);
            self.invalidate();
        }
        Ok(status.is_success())
    }

    /// The current session token, if any.
    ///
    /// Resource clients call this as a precondition; absence means the
    /// protected call must not be attempted.
    pub fn current_token(&self) -> Option<String> {
        let session = self.inner.session.lock().unwrap();
        session.token.clone()
    }

    /// The current user profile, if signed in
    pub fn current_user(&self) -> Option<Profile> {
        let session = self.inner.session.lock().unwrap();
        session.user.clone()
    }

    /// Whether the session is active
    pub fn is_signed_in(&self) -> bool {
        let session = self.inner.session.lock().unwrap();
        session.is_signed_in()
    }

    /// The session's lifecycle status
    pub fn status(&self) -> SessionStatus {
        let session = self.inner.session.lock().unwrap();
        session.status
    }

    /// Seed the store with already-obtained credentials.
    ///
    /// Exists for embedders that receive credentials out of band (and for
    /// exercising restore); normal flow goes through [`sign_in`].
    ///
    /// [`sign_in`]: SessionManager::sign_in
    pub fn seed_credentials(&self, token: &str, user: &Profile) -> Result<(), Error> {
        self.inner.store.set(JWT_TOKEN_KEY, token);
        self.inner
            .store
            .set(USER_DATA_KEY, &serde_json::to_string(user)?);
        Ok(())
    }
}
