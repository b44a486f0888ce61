//! The friends collection

use serde::{Deserialize, Serialize};

use crate::resource::ResourceRecord;

/// A friend record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// Server-assigned id
    pub id: i64,

    pub name: String,

    pub phone: String,

    /// Server-assigned, read-only
    pub created_at: String,

    /// Server-assigned, read-only
    pub updated_at: String,
}

/// Fields required to create a friend
#[derive(Debug, Clone, Serialize)]
pub struct NewFriend {
    pub name: String,
    pub phone: String,
}

/// Changed fields for a friend update; omitted fields are left untouched
/// server-side
#[derive(Debug, Clone, Default, Serialize)]
pub struct FriendChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ResourceRecord for Friend {
    const PATH: &'static str = "friends";
    const ENVELOPE: &'static str = "friend";
    const LABEL: &'static str = "Friend";

    type Create = NewFriend;
    type Update = FriendChanges;

    fn id(&self) -> i64 {
        self.id
    }
}
