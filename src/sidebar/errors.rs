use thiserror::Error;

/// Errors surfaced by the moderation sidebar.
///
/// All errors are local to a single request; nothing is retried.
/// An empty transition set is not an error and never appears here.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// The entity has no moderation-state field. Access checks turn
    /// this into a denial rather than a failure.
    #[error("entity {entity_type}/{entity_id} is not moderated")]
    NotModerated { entity_type: String, entity_id: u64 },

    /// The submitted transition is no longer in the valid set at
    /// submit time. Carries the submitted control id so the host can
    /// attach the error to the right form element. Nothing was
    /// mutated.
    #[error("invalid transition selected: {control}")]
    InvalidTransition { control: String },

    /// The storage collaborator failed to persist the revision.
    /// Fatal for the request; the in-memory mutation happens
    /// immediately before the single save call, so no partial state
    /// is left behind.
    #[error("failed to persist revision {revision_id} of {entity_type}/{entity_id}")]
    PersistenceFailure {
        entity_type: String,
        entity_id: u64,
        revision_id: u64,
        #[source]
        source: anyhow::Error,
    },

    /// Any other collaborator failure (entity load, state lookup,
    /// transition listing).
    #[error("host collaborator failure")]
    Host(#[from] anyhow::Error),
}

impl ModerationError {
    /// Whether this error should render as a form-field error rather
    /// than a request-level failure page.
    pub fn is_form_error(&self) -> bool {
        matches!(self, ModerationError::InvalidTransition { .. })
    }
}
