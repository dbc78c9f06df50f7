// Workflow Graph Module
//
// Value types for the moderation workflow graph (states and
// transitions) and the catalog that computes which transitions are
// valid for a revision and actor. The graph itself is owned by the
// host's workflow-definition store and reached through the
// WorkflowProvider collaborator.

pub mod catalog;
pub mod types;

pub use catalog::TransitionCatalog;
pub use types::{ModerationState, Transition};
