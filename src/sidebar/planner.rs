// Action planning - deciding which sidebar controls a revision gets

use serde::{Deserialize, Serialize};

use crate::revision::{ContentRevision, RevisionClassification};
use crate::sidebar::traits::RouteResolver;
use crate::workflow::Transition;

/// What kind of control an action renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Link to the latest-version view
    ViewLatest,
    /// Link to the canonical (live) view
    ViewLive,
    /// Link to the edit form
    EditDraft,
    /// Quick action creating a new draft in one click
    CreateDraft,
    /// Submit button applying one specific transition
    Transition,
    /// Submit button abandoning the pending draft
    DiscardDraft,
    /// Link to the delete form
    Delete,
}

/// Where an action leads: a resolved route, or a form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionTarget {
    /// Resolved URL for link actions
    Link { url: String },
    /// Control id for submit actions, echoed back on submission
    Submit { control: String },
}

/// One entry of the rendered action list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
    pub target: ActionTarget,
}

/// The ephemeral, per-request list of actions to present.
/// Computed fresh on every render; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSet {
    pub actions: Vec<Action>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn contains_kind(&self, kind: ActionKind) -> bool {
        self.actions.iter().any(|a| a.kind == kind)
    }

    /// All transition submit buttons, in presentation order
    pub fn transition_controls(&self) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.kind == ActionKind::Transition)
            .collect()
    }
}

/// Control id for the quick-draft submit button
pub const CREATE_DRAFT_CONTROL: &str = "create_draft";
/// Control id for the discard-draft submit button
pub const DISCARD_DRAFT_CONTROL: &str = "discard_draft";

/// Combines a revision's classification with its valid transitions
/// into the action set to present. Pure rendering-intent calculation;
/// the actual render call is the host's.
#[derive(Debug, Default)]
pub struct ActionPlanner;

impl ActionPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Decision table, evaluated in presentation order:
    ///
    /// - not the latest revision: link to the existing draft;
    /// - not the default revision: link to the live content;
    /// - latest and not live: link to the edit form;
    /// - transition area, determined solely by `is_default`: a
    ///   single quick-draft button on the default revision, or one
    ///   button per valid transition (plus discard) on a pending
    ///   draft. Never both. Nothing at all when `transitions` is
    ///   empty;
    /// - default revision: link to the delete form.
    pub fn plan<R>(
        &self,
        routes: &R,
        revision: &ContentRevision,
        classification: &RevisionClassification,
        transitions: &[Transition],
    ) -> ActionSet
    where
        R: RouteResolver,
    {
        let mut actions = ActionSet::new();
        let entity_type = revision.entity_type.as_str();
        let id = revision.entity_id;

        if !classification.is_latest {
            actions.push(Action {
                label: "View existing draft".to_string(),
                kind: ActionKind::ViewLatest,
                target: ActionTarget::Link {
                    url: routes.latest_version(entity_type, id),
                },
            });
        }

        if !classification.is_default {
            actions.push(Action {
                label: "View live content".to_string(),
                kind: ActionKind::ViewLive,
                target: ActionTarget::Link {
                    url: routes.canonical(entity_type, id),
                },
            });
        }

        if classification.is_latest && !classification.is_live {
            actions.push(Action {
                label: "Edit draft".to_string(),
                kind: ActionKind::EditDraft,
                target: ActionTarget::Link {
                    url: routes.edit_form(entity_type, id),
                },
            });
        }

        if classification.is_latest && !transitions.is_empty() {
            if classification.is_default {
                actions.push(Action {
                    label: "Create New Draft".to_string(),
                    kind: ActionKind::CreateDraft,
                    target: ActionTarget::Submit {
                        control: CREATE_DRAFT_CONTROL.to_string(),
                    },
                });
            } else {
                for transition in transitions {
                    actions.push(Action {
                        label: transition.label.clone(),
                        kind: ActionKind::Transition,
                        target: ActionTarget::Submit {
                            control: transition.id.clone(),
                        },
                    });
                }
            }
        }

        if classification.is_latest && !classification.is_default {
            actions.push(Action {
                label: "Discard draft".to_string(),
                kind: ActionKind::DiscardDraft,
                target: ActionTarget::Submit {
                    control: DISCARD_DRAFT_CONTROL.to_string(),
                },
            });
        }

        if classification.is_default {
            actions.push(Action {
                label: "Delete content".to_string(),
                kind: ActionKind::Delete,
                target: ActionTarget::Link {
                    url: routes.delete_form(entity_type, id),
                },
            });
        }

        tracing::debug!(
            entity.entity_type = entity_type,
            entity.id = id,
            is_latest = classification.is_latest,
            is_default = classification.is_default,
            is_live = classification.is_live,
            actions = actions.len(),
            "Planned sidebar actions"
        );

        actions
    }
}
