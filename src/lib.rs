// Moderation Sidebar - Contextual Moderation for Revisioned Content
// This exposes the state-transition engine and its host-facing surface

pub mod config;
pub mod revision;
pub mod sidebar;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{config, init_config, ModerationSidebarConfig, PresentationConfig};
pub use revision::{Actor, ContentRevision, RevisionClassification, RevisionClassifier, RevisionLog};
pub use sidebar::{
    Action, ActionKind, ActionPlanner, ActionSet, ActionTarget, Authorization, ContentStorage,
    ModerationError, ModerationSidebar, RevisionSummary, RouteResolver, SidebarContents,
    TransitionExecutor, TransitionOutcome, WorkflowProvider,
};
pub use telemetry::{
    create_moderation_span, generate_correlation_id, init_telemetry, shutdown_telemetry,
};
pub use workflow::{ModerationState, Transition, TransitionCatalog};
