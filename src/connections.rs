//! The connections collection

use serde::{Deserialize, Serialize};

use crate::resource::ResourceRecord;

/// How a connection relates to the user.
///
/// Closed set, mirrored by the backend: a value outside these eight is a
/// contract violation and is rejected at the serde boundary rather than
/// sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Friend,
    Family,
    Colleague,
    Partner,
    Parent,
    Child,
    Sibling,
    RomanticInterest,
}

/// A connection record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Server-assigned id
    pub id: i64,

    pub name: String,

    pub phone_number: String,

    pub relationship: Relationship,

    /// Server-assigned, read-only
    pub created_at: String,

    /// Server-assigned, read-only
    pub updated_at: String,
}

/// Fields required to create a connection
#[derive(Debug, Clone, Serialize)]
pub struct NewConnection {
    pub name: String,
    pub phone_number: String,
    pub relationship: Relationship,
}

/// Changed fields for a connection update; omitted fields are left
/// untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
}

impl ResourceRecord for Connection {
    const PATH: &'static str = "connections";
    const ENVELOPE: &'static str = "connection";
    const LABEL: &'static str = "Connection";

    type Create = NewConnection;
    type Update = ConnectionChanges;

    fn id(&self) -> i64 {
        self.id
    }
}
