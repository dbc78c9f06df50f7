// Classification of a revision along the latest/default/live axes

use serde::{Deserialize, Serialize};

use crate::revision::types::ContentRevision;
use crate::sidebar::errors::ModerationError;
use crate::sidebar::traits::{ContentStorage, WorkflowProvider};

/// Where a revision sits relative to its entity's other revisions.
///
/// The three axes are independent except for `is_live`, which is
/// derived: a revision is live iff it is the default revision and its
/// current state is a published kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionClassification {
    /// This is the most recent revision of the entity
    pub is_latest: bool,
    /// This is the canonical revision of the entity
    pub is_default: bool,
    /// This is the published, canonical revision
    pub is_live: bool,
}

impl RevisionClassification {
    /// A draft newer than the default revision exists somewhere
    pub fn has_pending_draft(&self) -> bool {
        !self.is_latest || !self.is_default
    }
}

/// Pure classification of a revision against external metadata.
/// No mutation; recomputed per request.
#[derive(Debug, Default)]
pub struct RevisionClassifier;

impl RevisionClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify<S, W>(
        &self,
        storage: &S,
        workflow: &W,
        revision: &ContentRevision,
    ) -> Result<RevisionClassification, ModerationError>
    where
        S: ContentStorage,
        W: WorkflowProvider,
    {
        let state_id = revision.current_state_id()?;
        let state = workflow.load_state(state_id)?;
        let is_latest = storage.is_latest_revision(revision)?;
        let is_default = revision.is_default;

        Ok(RevisionClassification {
            is_latest,
            is_default,
            is_live: is_default && state.published,
        })
    }
}
