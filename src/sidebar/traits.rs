// Traits for the host framework collaborators - separating concerns for testability

use anyhow::Result;

use crate::revision::{Actor, ContentRevision};
use crate::workflow::{ModerationState, Transition};

/// Content storage interface
pub trait ContentStorage {
    /// Load the default revision of an entity
    fn load(&self, entity_type: &str, id: u64) -> Result<ContentRevision>;

    /// Load the most recent revision of an entity
    fn load_latest_revision(&self, entity_type: &str, id: u64) -> Result<ContentRevision>;

    /// Persist a revision
    fn save(&self, revision: &ContentRevision) -> Result<()>;

    /// Whether this revision is the most recent one for its entity
    fn is_latest_revision(&self, revision: &ContentRevision) -> Result<bool>;
}

/// Workflow graph interface
pub trait WorkflowProvider {
    /// Load a moderation state by id
    fn load_state(&self, id: &str) -> Result<ModerationState>;

    /// Outgoing transitions of a state, in graph-definition order
    fn outgoing_transitions(&self, state_id: &str) -> Result<Vec<Transition>>;
}

/// Authorization interface
pub trait Authorization {
    /// Whether the actor may use this transition
    fn can_use_transition(&self, actor: &Actor, transition: &Transition) -> bool;
}

/// Named-route resolution for the sidebar's links and redirects
pub trait RouteResolver {
    /// Canonical (live) view of an entity
    fn canonical(&self, entity_type: &str, id: u64) -> String;

    /// Latest-version view of an entity
    fn latest_version(&self, entity_type: &str, id: u64) -> String;

    /// Edit form of an entity
    fn edit_form(&self, entity_type: &str, id: u64) -> String;

    /// Delete form of an entity
    fn delete_form(&self, entity_type: &str, id: u64) -> String;
}

// Collaborators are usually owned by the host container and lent to
// the sidebar, so the traits are also implemented for references.

impl<T: ContentStorage + ?Sized> ContentStorage for &T {
    fn load(&self, entity_type: &str, id: u64) -> Result<ContentRevision> {
        (**self).load(entity_type, id)
    }

    fn load_latest_revision(&self, entity_type: &str, id: u64) -> Result<ContentRevision> {
        (**self).load_latest_revision(entity_type, id)
    }

    fn save(&self, revision: &ContentRevision) -> Result<()> {
        (**self).save(revision)
    }

    fn is_latest_revision(&self, revision: &ContentRevision) -> Result<bool> {
        (**self).is_latest_revision(revision)
    }
}

impl<T: WorkflowProvider + ?Sized> WorkflowProvider for &T {
    fn load_state(&self, id: &str) -> Result<ModerationState> {
        (**self).load_state(id)
    }

    fn outgoing_transitions(&self, state_id: &str) -> Result<Vec<Transition>> {
        (**self).outgoing_transitions(state_id)
    }
}

impl<T: Authorization + ?Sized> Authorization for &T {
    fn can_use_transition(&self, actor: &Actor, transition: &Transition) -> bool {
        (**self).can_use_transition(actor, transition)
    }
}

impl<T: RouteResolver + ?Sized> RouteResolver for &T {
    fn canonical(&self, entity_type: &str, id: u64) -> String {
        (**self).canonical(entity_type, id)
    }

    fn latest_version(&self, entity_type: &str, id: u64) -> String {
        (**self).latest_version(entity_type, id)
    }

    fn edit_form(&self, entity_type: &str, id: u64) -> String {
        (**self).edit_form(entity_type, id)
    }

    fn delete_form(&self, entity_type: &str, id: u64) -> String {
        (**self).delete_form(entity_type, id)
    }
}
