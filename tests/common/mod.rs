#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use wiremock::MockServer;

use touchbase_client::auth::Profile;
use touchbase_client::provider::{
    IdentityProvider, ProviderError, ProviderFlow, ProviderIdentity,
};
use touchbase_client::Touchbase;

/// A provider identity carrying the given id token
pub fn identity_with_token(token: Option<&str>) -> ProviderIdentity {
    ProviderIdentity {
        provider_user_id: "google-user-1".to_string(),
        name: Some("Ada Lovelace".to_string()),
        email: "ada@example.com".to_string(),
        photo_url: None,
        identity_token: token.map(str::to_string),
    }
}

pub fn profile() -> Profile {
    Profile {
        id: 7,
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        avatar_url: None,
    }
}

enum Behavior {
    Complete(ProviderIdentity),
    Cancel,
    Unavailable(String),
}

/// Scriptable identity provider for tests
pub struct StubProvider {
    behavior: Behavior,
    gate: Option<Arc<Notify>>,
    fail_sign_out: bool,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl StubProvider {
    pub fn completing(identity: ProviderIdentity) -> Self {
        Self::with_behavior(Behavior::Complete(identity))
    }

    pub fn cancelling() -> Self {
        Self::with_behavior(Behavior::Cancel)
    }

    pub fn unavailable(detail: &str) -> Self {
        Self::with_behavior(Behavior::Unavailable(detail.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            gate: None,
            fail_sign_out: false,
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Hold each sign-in attempt until the notify is triggered
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Make provider-side sign-out fail
    pub fn failing_sign_out(mut self) -> Self {
        self.fail_sign_out = true;
        self
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    async fn sign_in(&self) -> Result<ProviderFlow, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.behavior {
            Behavior::Complete(identity) => Ok(ProviderFlow::Completed(identity.clone())),
            Behavior::Cancel => Ok(ProviderFlow::Cancelled),
            Behavior::Unavailable(detail) => Err(ProviderError::Unavailable(detail.clone())),
        }
    }

    async fn current_identity(&self) -> Option<ProviderIdentity> {
        None
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out {
            Err(ProviderError::Failed("provider unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

/// A client pointed at the mock server with an already-restored session
pub async fn signed_in_client(server: &MockServer) -> Touchbase {
    let client = Touchbase::new(&server.uri(), Arc::new(StubProvider::cancelling()));
    client
        .session
        .seed_credentials("test_token", &profile())
        .unwrap();
    assert!(client.session.restore().await);
    client
}

/// A client pointed at the mock server with no session
pub fn signed_out_client(server: &MockServer) -> Touchbase {
    Touchbase::new(&server.uri(), Arc::new(StubProvider::cancelling()))
}
