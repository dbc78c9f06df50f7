// Core types for content revisions and the acting user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sidebar::errors::ModerationError;

/// The user performing a moderation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Account name, used for permission checks and logging
    pub name: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Revision metadata recorded by hosts that keep a revision log.
/// Optional capability; entities without one render no author line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionLog {
    /// Account name of the revision author
    pub author: String,
    /// When the revision was created
    pub created: DateTime<Utc>,
}

/// A versioned unit of content.
///
/// Owned by the host's content storage; this crate reads it and asks
/// storage to persist changes to the moderation-state reference and
/// the audit message. Everything else is opaque host data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRevision {
    /// Entity type machine name (e.g. "article")
    pub entity_type: String,
    /// Human-readable label of the entity type, for the sidebar title
    pub type_label: String,
    /// Id of the owning entity
    pub entity_id: u64,
    /// Id of this revision
    pub revision_id: u64,
    /// Entity label shown at the top of the sidebar
    pub title: String,
    /// Reference to the current moderation state; `None` means the
    /// entity is not under moderation at all
    pub moderation_state: Option<String>,
    /// Whether this revision is the canonical one for the entity
    pub is_default: bool,
    /// Revision-log capability (author and creation time), if the
    /// host records one for this entity type
    pub revision_log: Option<RevisionLog>,
    /// Changed-timestamp capability, if the host tracks one
    pub changed: Option<DateTime<Utc>>,
    /// Audit message attached to the next save
    pub audit_message: String,
}

impl ContentRevision {
    /// Whether the entity is under moderation
    pub fn is_moderated(&self) -> bool {
        self.moderation_state.is_some()
    }

    /// The current moderation-state id, or `NotModerated`
    pub fn current_state_id(&self) -> Result<&str, ModerationError> {
        self.moderation_state
            .as_deref()
            .ok_or_else(|| ModerationError::NotModerated {
                entity_type: self.entity_type.clone(),
                entity_id: self.entity_id,
            })
    }

    /// Revision-log capability query
    pub fn revision_log(&self) -> Option<&RevisionLog> {
        self.revision_log.as_ref()
    }

    /// Changed-timestamp capability query
    pub fn changed(&self) -> Option<DateTime<Utc>> {
        self.changed
    }
}
