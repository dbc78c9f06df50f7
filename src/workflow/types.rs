// Core types for the moderation workflow graph

use serde::{Deserialize, Serialize};

/// A named node in the moderation workflow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationState {
    /// Machine name of the state (e.g. "draft", "published")
    pub id: String,
    /// Human-readable label shown in the sidebar
    pub label: String,
    /// Whether revisions in this state are a live, publicly visible kind
    pub published: bool,
}

impl ModerationState {
    pub fn new(id: impl Into<String>, label: impl Into<String>, published: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            published,
        }
    }

    pub fn is_published_state(&self) -> bool {
        self.published
    }
}

impl std::fmt::Display for ModerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// A directed edge between two moderation states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Machine name of the transition (e.g. "published_draft")
    pub id: String,
    /// Human-readable label shown on the transition button
    pub label: String,
    /// State id this transition leaves from
    pub from: String,
    /// State id this transition arrives at
    pub to: String,
}

impl Transition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// A transition that would leave the entity in its current state
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} -> {})", self.id, self.from, self.to)
    }
}
