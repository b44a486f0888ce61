//! Generic authenticated resource client
//!
//! One backend collection (friends, connections) is accessed through a
//! [`ResourceClient`] parameterized by its record type. Every call is gated
//! on the session token, wraps request bodies in the Rails-style
//! `{"<resource>": {...}}` envelope, and unwraps the `{success, data}`
//! response envelope. Failures come back as one classified error; nothing is
//! retried.

use std::marker::PhantomData;

use log::debug;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionManager;
use crate::error::{classify_resource, Error};
use crate::fetch::Fetch;

/// A server-owned record living in one REST collection
pub trait ResourceRecord: DeserializeOwned {
    /// Collection path segment, e.g. `friends`
    const PATH: &'static str;

    /// Request envelope key, e.g. `friend`
    const ENVELOPE: &'static str;

    /// Human name used in error messages, e.g. `Friend`
    const LABEL: &'static str;

    /// Field set accepted when creating a record
    type Create: Serialize;

    /// Field set accepted when updating a record; all fields optional
    type Update: Serialize;

    /// The server-assigned id
    fn id(&self) -> i64;
}

/// `{success, data}` envelope around a single record or a list
#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    #[allow(dead_code)]
    success: bool,
    data: T,
}

/// `{success, message}` envelope returned by delete
#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[allow(dead_code)]
    success: bool,
    message: String,
}

/// Client for list/get/create/update/delete against one collection
pub struct ResourceClient<R: ResourceRecord> {
    base_url: String,
    client: Client,
    session: SessionManager,
    _record: PhantomData<R>,
}

impl<R: ResourceRecord> ResourceClient<R> {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionManager) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, R::PATH, id)
    }

    /// Precondition for every operation: a session token must be present.
    /// Violation fails fast, before any request is built.
    fn token(&self) -> Result<String, Error> {
        self.session.current_token().ok_or(Error::NotAuthenticated)
    }

    /// Fetch the whole collection, in server order
    pub async fn list(&self) -> Result<Vec<R>, Error> {
        let token = self.token()?;
        debug!("fetching {}", R::PATH);

        let response: DataResponse<Vec<R>> = Fetch::get(&self.client, &self.collection_url())
            .bearer_auth(&token)
            .execute(|status, body| {
                classify_resource(status, body, R::LABEL, &format!("fetch {}", R::PATH))
            })
            .await?;
        Ok(response.data)
    }

    /// Fetch one record by id
    pub async fn get(&self, id: i64) -> Result<R, Error> {
        let token = self.token()?;

        let response: DataResponse<R> = Fetch::get(&self.client, &self.record_url(id))
            .bearer_auth(&token)
            .execute(|status, body| {
                classify_resource(status, body, R::LABEL, &format!("fetch {}", R::ENVELOPE))
            })
            .await?;
        Ok(response.data)
    }

    /// Create a record; the server assigns id and timestamps
    pub async fn create(&self, fields: &R::Create) -> Result<R, Error> {
        let token = self.token()?;
        debug!("creating {}", R::ENVELOPE);

        let envelope = json!({ (R::ENVELOPE): fields });
        let response: DataResponse<R> = Fetch::post(&self.client, &self.collection_url())
            .bearer_auth(&token)
            .json(&envelope)?
            .execute(|status, body| {
                classify_resource(status, body, R::LABEL, &format!("create {}", R::ENVELOPE))
            })
            .await?;
        Ok(response.data)
    }

    /// Update a record with the changed fields only; the server returns the
    /// full updated record
    pub async fn update(&self, id: i64, fields: &R::Update) -> Result<R, Error> {
        let token = self.token()?;
        debug!("updating {} {}", R::ENVELOPE, id);

        let envelope = json!({ (R::ENVELOPE): fields });
        let response: DataResponse<R> = Fetch::put(&self.client, &self.record_url(id))
            .bearer_auth(&token)
            .json(&envelope)?
            .execute(|status, body| {
                classify_resource(status, body, R::LABEL, &format!("update {}", R::ENVELOPE))
            })
            .await?;
        Ok(response.data)
    }

    /// Delete a record; returns the server's confirmation message
    pub async fn delete(&self, id: i64) -> Result<String, Error> {
        let token = self.token()?;
        debug!("deleting {} {}", R::ENVELOPE, id);

        let response: DeleteResponse = Fetch::delete(&self.client, &self.record_url(id))
            .bearer_auth(&token)
            .execute(|status, body| {
                classify_resource(status, body, R::LABEL, &format!("delete {}", R::ENVELOPE))
            })
            .await?;
        Ok(response.message)
    }
}
