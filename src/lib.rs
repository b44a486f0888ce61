//! Touchbase Rust Client Library
//!
//! Client for the Touchbase contacts backend: Google sign-in exchanged for a
//! backend session token, session lifecycle management, and authenticated
//! CRUD over the friends and connections collections plus the one-time
//! onboarding/notification-preference flow.
//!
//! The session is the heart of the crate. A [`SessionManager`] owns it
//! exclusively: sign-in runs the identity-provider flow, exchanges the
//! provider token at `/auth/google`, and persists the result in a volatile
//! in-process store; restore picks those credentials back up at startup;
//! sign-out tears everything down unconditionally. Resource clients read the
//! token through the manager and refuse to touch the network without one.

pub mod auth;
pub mod collection;
pub mod config;
pub mod connections;
pub mod error;
pub mod fetch;
pub mod friends;
pub mod onboarding;
pub mod provider;
pub mod resource;
pub mod store;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::SessionManager;
use crate::collection::Collection;
use crate::config::ClientOptions;
use crate::connections::Connection;
use crate::friends::Friend;
use crate::onboarding::OnboardingClient;
use crate::provider::IdentityProvider;
use crate::resource::ResourceClient;

/// The main entry point for the Touchbase client
pub struct Touchbase {
    /// Base URL of the backend API, e.g. `http://localhost:3000/api/v1`
    pub base_url: String,

    /// HTTP client shared by every component
    pub http_client: Client,

    /// The session manager, sole owner of session state
    pub session: SessionManager,

    /// Client options
    pub options: ClientOptions,
}

impl Touchbase {
    /// Create a new Touchbase client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend API
    /// * `provider` - The identity provider used for interactive sign-in
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use touchbase_client::Touchbase;
    /// # use touchbase_client::provider::{IdentityProvider, ProviderError, ProviderFlow, ProviderIdentity};
    /// # struct GoogleProvider;
    /// # #[async_trait::async_trait]
    /// # impl IdentityProvider for GoogleProvider {
    /// #     async fn sign_in(&self) -> Result<ProviderFlow, ProviderError> { unimplemented!() }
    /// #     async fn current_identity(&self) -> Option<ProviderIdentity> { None }
    /// #     async fn sign_out(&self) -> Result<(), ProviderError> { Ok(()) }
    /// # }
    ///
    /// let client = Touchbase::new("http://localhost:3000/api/v1", Arc::new(GoogleProvider));
    /// ```
    pub fn new(base_url: &str, provider: Arc<dyn IdentityProvider>) -> Self {
        Self::new_with_options(base_url, provider, ClientOptions::default())
    }

    /// Create a new Touchbase client with custom options
    pub fn new_with_options(
        base_url: &str,
        provider: Arc<dyn IdentityProvider>,
        options: ClientOptions,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        let session = SessionManager::new(&base_url, http_client.clone(), provider);

        Self {
            base_url,
            http_client,
            session,
            options,
        }
    }

    /// Get a reference to the session manager
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Create a client for the friends collection
    pub fn friends(&self) -> ResourceClient<Friend> {
        ResourceClient::new(&self.base_url, self.http_client.clone(), self.session.clone())
    }

    /// Create a client for the connections collection
    pub fn connections(&self) -> ResourceClient<Connection> {
        ResourceClient::new(&self.base_url, self.http_client.clone(), self.session.clone())
    }

    /// Create a local mirror of the friends collection
    pub fn friends_collection(&self) -> Collection<Friend> {
        Collection::new(self.friends())
    }

    /// Create a local mirror of the connections collection
    pub fn connections_collection(&self) -> Collection<Connection> {
        Collection::new(self.connections())
    }

    /// Create a client for the onboarding/preferences endpoints
    pub fn onboarding(&self) -> OnboardingClient {
        OnboardingClient::new(&self.base_url, self.http_client.clone(), self.session.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Profile, SessionManager, SessionStatus, SignInOutcome};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::provider::{IdentityProvider, ProviderFlow, ProviderIdentity};
    pub use crate::Touchbase;
}
