//! Reaction entity - one actor's vote on one article, and the toggle state machine

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::{CollectionSchema, Document, FieldKind, FieldSpec, RelationSpec};
use crate::value_objects::{Polarity, RecordId};

/// Reaction entity. At most one per (user, article).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: RecordId,
    #[serde(rename = "user")]
    pub user_id: RecordId,
    #[serde(rename = "article")]
    pub article_id: RecordId,
    #[serde(rename = "quantity")]
    pub polarity: Polarity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(user_id: RecordId, article_id: RecordId, polarity: Polarity) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            user_id,
            article_id,
            polarity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Switch polarity in place, refreshing `updated_at`
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
        self.updated_at = Utc::now();
    }

    pub fn to_document(&self) -> Document {
        crate::query::to_document(self)
    }
}

/// Vote state of an (actor, article) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionState {
    Absent,
    Liked,
    Disliked,
}

/// What applying a vote does to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No record yet: create one
    Insert,
    /// Same polarity again: delete the record
    Retract,
    /// Opposite polarity: update the record in place
    Flip,
}

impl From<Option<&Reaction>> for ReactionState {
    fn from(existing: Option<&Reaction>) -> Self {
        match existing.map(|r| r.polarity) {
            None => Self::Absent,
            Some(Polarity::Like) => Self::Liked,
            Some(Polarity::Dislike) => Self::Disliked,
        }
    }
}

impl From<Polarity> for ReactionState {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Like => Self::Liked,
            Polarity::Dislike => Self::Disliked,
        }
    }
}

impl ReactionState {
    pub fn transition(self, incoming: Polarity) -> Transition {
        match (self, incoming) {
            (Self::Absent, _) => Transition::Insert,
            (Self::Liked, Polarity::Like) | (Self::Disliked, Polarity::Dislike) => {
                Transition::Retract
            }
            (Self::Liked, Polarity::Dislike) | (Self::Disliked, Polarity::Like) => {
                Transition::Flip
            }
        }
    }
}

/// Result of applying a vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Created(Reaction),
    Updated(Reaction),
    Removed,
}

impl VoteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created(_) => "Like created successfully",
            Self::Updated(_) => "Like updated successfully",
            Self::Removed => "Like removed successfully",
        }
    }

    pub fn reaction(&self) -> Option<&Reaction> {
        match self {
            Self::Created(r) | Self::Updated(r) => Some(r),
            Self::Removed => None,
        }
    }

    pub fn into_reaction(self) -> Option<Reaction> {
        match self {
            Self::Created(r) | Self::Updated(r) => Some(r),
            Self::Removed => None,
        }
    }

    /// Pair state after this outcome
    pub fn state(&self) -> ReactionState {
        ReactionState::from(self.reaction())
    }
}

pub static REACTION_SCHEMA: CollectionSchema = CollectionSchema {
    name: "likes",
    fields: &[
        FieldSpec::new("id", FieldKind::Id),
        FieldSpec::new("user", FieldKind::Id),
        FieldSpec::new("article", FieldKind::Id),
        FieldSpec::new("quantity", FieldKind::Integer),
        FieldSpec::new("createdAt", FieldKind::DateTime),
        FieldSpec::new("updatedAt", FieldKind::DateTime),
    ],
    relations: &[
        RelationSpec {
            path: "article",
            fields: &["id", "title", "content", "thumbnail", "author", "createdAt"],
            default_select: &["id", "title", "thumbnail"],
        },
        RelationSpec {
            path: "user",
            fields: &["id", "name", "email", "avatar"],
            default_select: &["id", "name", "email"],
        },
    ],
    soft_delete: false,
    default_relation: Some("article"),
};
