//! Local mirror of one server collection
//!
//! Mutation discipline: the local list changes only after the server
//! confirms. A create appends the server-returned record, an update replaces
//! the matching record wholesale with the server's copy, a delete removes
//! the record only once the server has acknowledged it. There is no
//! optimistic mutation and no client-side merge of partial fields.

use crate::error::Error;
use crate::resource::{ResourceClient, ResourceRecord};

/// A collection of records mirroring server order, plus the client that
/// keeps it in sync
pub struct Collection<R: ResourceRecord> {
    client: ResourceClient<R>,
    records: Vec<R>,
}

impl<R: ResourceRecord> Collection<R> {
    /// Create an empty collection backed by `client`
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            client,
            records: Vec::new(),
        }
    }

    /// Replace the local list with the server's, in server order
    pub async fn refresh(&mut self) -> Result<&[R], Error> {
        self.records = self.client.list().await?;
        Ok(&self.records)
    }

    /// Create a record on the server and append the returned copy.
    ///
    /// If the server hands back an id the list already holds, the old entry
    /// is dropped first so the id stays unique locally.
    pub async fn create(&mut self, fields: &R::Create) -> Result<&R, Error> {
        let created = self.client.create(fields).await?;
        self.records.retain(|record| record.id() != created.id());
        self.records.push(created);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Update a record on the server and replace the local copy wholesale
    /// with the server's response
    pub async fn update(&mut self, id: i64, fields: &R::Update) -> Result<&R, Error> {
        let updated = self.client.update(id, fields).await?;

        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => {
                self.records[index] = updated;
                Ok(&self.records[index])
            }
            None => {
                // Not mirrored locally yet; the server copy is authoritative
                self.records.push(updated);
                let index = self.records.len() - 1;
                Ok(&self.records[index])
            }
        }
    }

    /// Delete a record on the server, removing it locally only after the
    /// server confirms. Returns the server's confirmation message.
    pub async fn delete(&mut self, id: i64) -> Result<String, Error> {
        let message = self.client.delete(id).await?;
        self.records.retain(|record| record.id() != id);
        Ok(message)
    }

    /// The mirrored records, in server order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Find a mirrored record by id
    pub fn find(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Number of mirrored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the mirror is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
