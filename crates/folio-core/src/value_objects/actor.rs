//! Authenticated caller identity and the audit snapshot stored on records

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Identity of the authenticated caller, resolved from the bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: RecordId,
    pub email: String,
}

impl Actor {
    pub fn new(id: RecordId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Who created/updated/deleted a record, captured at write time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub id: RecordId,
    pub email: String,
}

impl From<&Actor> for Attribution {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            email: actor.email.clone(),
        }
    }
}
