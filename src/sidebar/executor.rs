// Transition execution - the single mutation path of the sidebar

use serde::{Deserialize, Serialize};

use crate::revision::{Actor, ContentRevision};
use crate::sidebar::errors::ModerationError;
use crate::sidebar::planner::{CREATE_DRAFT_CONTROL, DISCARD_DRAFT_CONTROL};
use crate::sidebar::traits::{Authorization, ContentStorage, RouteResolver, WorkflowProvider};
use crate::workflow::{ModerationState, TransitionCatalog};

/// Transient status message after a successful transition
pub const STATE_UPDATED_MESSAGE: &str = "The moderation state has been updated.";
/// Transient status message after discarding a draft
pub const DRAFT_DISCARDED_MESSAGE: &str = "The draft has been discarded successfully.";

/// Result of a successfully applied transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// The state the revision now carries
    pub to_state: ModerationState,
    /// Where the host should send the user next
    pub redirect: String,
    /// Transient confirmation message for the user
    pub message: String,
}

/// Applies a selected transition to a revision.
///
/// The valid-transition set is recomputed here, at submission time;
/// the set computed at render time is never trusted, since state and
/// permissions can change between page loads. The in-memory mutation
/// happens immediately before the single save call, which is the
/// commit point.
#[derive(Debug, Default)]
pub struct TransitionExecutor {
    catalog: TransitionCatalog,
}

impl TransitionExecutor {
    pub fn new() -> Self {
        Self {
            catalog: TransitionCatalog::new(),
        }
    }

    /// Apply the transition the actor selected from the panel.
    ///
    /// Fails with `InvalidTransition` (attached to the submitted
    /// control, no mutation) when the transition has since left the
    /// valid set. Redirects to the canonical view when the resulting
    /// state is a published kind, to the latest-version view
    /// otherwise.
    pub fn apply_transition<S, W, A, R>(
        &self,
        storage: &S,
        workflow: &W,
        authz: &A,
        routes: &R,
        revision: &ContentRevision,
        actor: &Actor,
        transition_id: &str,
    ) -> Result<TransitionOutcome, ModerationError>
    where
        S: ContentStorage,
        W: WorkflowProvider,
        A: Authorization,
        R: RouteResolver,
    {
        let valid = self
            .catalog
            .valid_transitions(workflow, authz, revision, actor)?;

        let Some(transition) = valid.iter().find(|t| t.id == transition_id) else {
            tracing::warn!(
                entity.entity_type = %revision.entity_type,
                entity.id = revision.entity_id,
                transition = transition_id,
                actor = %actor.name,
                "Rejected stale or forbidden transition"
            );
            return Err(ModerationError::InvalidTransition {
                control: transition_id.to_string(),
            });
        };

        let state = workflow.load_state(&transition.to)?;

        let mut updated = revision.clone();
        updated.moderation_state = Some(state.id.clone());
        updated.audit_message = format!(
            "Used the moderation sidebar to change the state to \"{}\".",
            state.label
        );
        self.persist(storage, &updated)?;

        tracing::info!(
            entity.entity_type = %revision.entity_type,
            entity.id = revision.entity_id,
            revision = revision.revision_id,
            transition = %transition.id,
            to_state = %state.id,
            actor = %actor.name,
            "Moderation state updated"
        );

        let redirect = if state.published {
            routes.canonical(&revision.entity_type, revision.entity_id)
        } else {
            routes.latest_version(&revision.entity_type, revision.entity_id)
        };

        Ok(TransitionOutcome {
            to_state: state,
            redirect,
            message: STATE_UPDATED_MESSAGE.to_string(),
        })
    }

    /// Single-click draft creation: auto-selects the first valid
    /// transition and skips the audit log. Always lands on the
    /// latest-version view, where the new draft lives.
    pub fn quick_draft<S, W, A, R>(
        &self,
        storage: &S,
        workflow: &W,
        authz: &A,
        routes: &R,
        revision: &ContentRevision,
        actor: &Actor,
    ) -> Result<TransitionOutcome, ModerationError>
    where
        S: ContentStorage,
        W: WorkflowProvider,
        A: Authorization,
        R: RouteResolver,
    {
        let valid = self
            .catalog
            .valid_transitions(workflow, authz, revision, actor)?;

        let Some(transition) = valid.first() else {
            return Err(ModerationError::InvalidTransition {
                control: CREATE_DRAFT_CONTROL.to_string(),
            });
        };

        let state = workflow.load_state(&transition.to)?;

        let mut updated = revision.clone();
        updated.moderation_state = Some(state.id.clone());
        updated.audit_message = String::new();
        self.persist(storage, &updated)?;

        tracing::info!(
            entity.entity_type = %revision.entity_type,
            entity.id = revision.entity_id,
            revision = revision.revision_id,
            transition = %transition.id,
            to_state = %state.id,
            actor = %actor.name,
            "Quick draft created"
        );

        Ok(TransitionOutcome {
            to_state: state,
            redirect: routes.latest_version(&revision.entity_type, revision.entity_id),
            message: STATE_UPDATED_MESSAGE.to_string(),
        })
    }

    /// Abandon a pending draft by pointing it back at the default
    /// revision's state. Only meaningful on a latest, non-default
    /// revision.
    pub fn discard_draft<S, W, R>(
        &self,
        storage: &S,
        workflow: &W,
        routes: &R,
        revision: &ContentRevision,
        actor: &Actor,
    ) -> Result<TransitionOutcome, ModerationError>
    where
        S: ContentStorage,
        W: WorkflowProvider,
        R: RouteResolver,
    {
        let is_latest = storage.is_latest_revision(revision)?;
        if !is_latest || revision.is_default {
            return Err(ModerationError::InvalidTransition {
                control: DISCARD_DRAFT_CONTROL.to_string(),
            });
        }

        let default_revision = storage.load(&revision.entity_type, revision.entity_id)?;
        let state = workflow.load_state(default_revision.current_state_id()?)?;

        let mut updated = revision.clone();
        updated.moderation_state = Some(state.id.clone());
        updated.audit_message =
            "Used the moderation sidebar to discard the current draft.".to_string();
        self.persist(storage, &updated)?;

        tracing::info!(
            entity.entity_type = %revision.entity_type,
            entity.id = revision.entity_id,
            revision = revision.revision_id,
            to_state = %state.id,
            actor = %actor.name,
            "Draft discarded"
        );

        Ok(TransitionOutcome {
            to_state: state,
            redirect: routes.canonical(&revision.entity_type, revision.entity_id),
            message: DRAFT_DISCARDED_MESSAGE.to_string(),
        })
    }

    fn persist<S: ContentStorage>(
        &self,
        storage: &S,
        revision: &ContentRevision,
    ) -> Result<(), ModerationError> {
        storage
            .save(revision)
            .map_err(|source| ModerationError::PersistenceFailure {
                entity_type: revision.entity_type.clone(),
                entity_id: revision.entity_id,
                revision_id: revision.revision_id,
                source,
            })
    }
}
