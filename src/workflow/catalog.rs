// Valid-transition computation for a revision and actor

use crate::revision::{Actor, ContentRevision};
use crate::sidebar::errors::ModerationError;
use crate::sidebar::traits::{Authorization, WorkflowProvider};
use crate::workflow::types::Transition;

/// Computes the transitions an actor may apply to a revision.
///
/// Validity is recomputed on every call: permissions and the current
/// state can both change between page loads, so nothing here is
/// cached.
#[derive(Debug, Default)]
pub struct TransitionCatalog;

impl TransitionCatalog {
    pub fn new() -> Self {
        Self
    }

    /// The ordered set of transitions out of the revision's current
    /// state that the actor is permitted to use.
    ///
    /// Self-transitions are excluded even when the underlying graph
    /// allows them, so the sidebar never presents a no-op button.
    /// Ordering follows the graph definition, keeping buttons stable
    /// across requests. An empty result is not an error; the caller
    /// disables the transition UI instead.
    pub fn valid_transitions<W, A>(
        &self,
        workflow: &W,
        authz: &A,
        revision: &ContentRevision,
        actor: &Actor,
    ) -> Result<Vec<Transition>, ModerationError>
    where
        W: WorkflowProvider,
        A: Authorization,
    {
        let current = revision.current_state_id()?;

        let outgoing = workflow.outgoing_transitions(current)?;
        let candidates = outgoing.len();

        let valid: Vec<Transition> = outgoing
            .into_iter()
            .filter(|transition| transition.to != current)
            .filter(|transition| authz.can_use_transition(actor, transition))
            .collect();

        tracing::debug!(
            entity.entity_type = %revision.entity_type,
            entity.id = revision.entity_id,
            state = current,
            actor = %actor.name,
            candidates = candidates,
            valid = valid.len(),
            "Computed valid transitions"
        );

        Ok(valid)
    }
}
