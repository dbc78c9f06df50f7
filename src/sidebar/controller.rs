// Host-facing surface of the moderation sidebar

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{self, PresentationConfig};
use crate::revision::{Actor, ContentRevision, RevisionClassifier};
use crate::sidebar::errors::ModerationError;
use crate::sidebar::executor::{TransitionExecutor, TransitionOutcome};
use crate::sidebar::info::RevisionSummary;
use crate::sidebar::planner::{ActionPlanner, ActionSet};
use crate::sidebar::traits::{Authorization, ContentStorage, RouteResolver, WorkflowProvider};
use crate::workflow::TransitionCatalog;

/// Render-ready sidebar data for one revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarContents {
    pub info: RevisionSummary,
    pub actions: ActionSet,
}

/// Transform applied to every computed action set before it is
/// handed to the host, in registration order
pub type ActionSetAlter = Box<dyn Fn(&mut ActionSet, &ContentRevision) + Send + Sync>;

/// Wires the classifier, catalog, planner and executor to the host's
/// collaborators and exposes the sidebar entry points: contents,
/// title, access check, and one submit handler per form.
pub struct ModerationSidebar<S, W, A, R> {
    storage: S,
    workflow: W,
    authz: A,
    routes: R,
    classifier: RevisionClassifier,
    catalog: TransitionCatalog,
    planner: ActionPlanner,
    executor: TransitionExecutor,
    presentation: PresentationConfig,
    alters: Vec<ActionSetAlter>,
}

impl<S, W, A, R> ModerationSidebar<S, W, A, R>
where
    S: ContentStorage,
    W: WorkflowProvider,
    A: Authorization,
    R: RouteResolver,
{
    pub fn new(storage: S, workflow: W, authz: A, routes: R) -> Self {
        let presentation = config::config()
            .map(|c| c.presentation.clone())
            .unwrap_or_default();
        Self {
            storage,
            workflow,
            authz,
            routes,
            classifier: RevisionClassifier::new(),
            catalog: TransitionCatalog::new(),
            planner: ActionPlanner::new(),
            executor: TransitionExecutor::new(),
            presentation,
            alters: Vec::new(),
        }
    }

    /// Override the presentation settings (mainly for tests)
    pub fn with_presentation(mut self, presentation: PresentationConfig) -> Self {
        self.presentation = presentation;
        self
    }

    /// Register a transform applied to every computed action set,
    /// after planning and before the host renders it. Transforms run
    /// in registration order.
    pub fn add_alter(
        &mut self,
        alter: impl Fn(&mut ActionSet, &ContentRevision) + Send + Sync + 'static,
    ) {
        self.alters.push(Box::new(alter));
    }

    /// Sidebar contents for the default revision of an entity
    pub fn contents(
        &self,
        entity_type: &str,
        id: u64,
        actor: &Actor,
    ) -> Result<SidebarContents, ModerationError> {
        let revision = self.storage.load(entity_type, id)?;
        self.contents_for_revision(&revision, actor)
    }

    /// Sidebar contents for the latest revision of an entity
    pub fn contents_for_latest(
        &self,
        entity_type: &str,
        id: u64,
        actor: &Actor,
    ) -> Result<SidebarContents, ModerationError> {
        let revision = self.storage.load_latest_revision(entity_type, id)?;
        self.contents_for_revision(&revision, actor)
    }

    /// Sidebar contents for a specific revision the host already
    /// holds (the routed one)
    pub fn contents_for_revision(
        &self,
        revision: &ContentRevision,
        actor: &Actor,
    ) -> Result<SidebarContents, ModerationError> {
        let classification = self
            .classifier
            .classify(&self.storage, &self.workflow, revision)?;
        let transitions =
            self.catalog
                .valid_transitions(&self.workflow, &self.authz, revision, actor)?;
        let state = self.workflow.load_state(revision.current_state_id()?)?;

        let info = RevisionSummary::build(
            revision,
            &state,
            Utc::now(),
            Duration::days(self.presentation.recent_edit_window_days),
        );

        let mut actions = self
            .planner
            .plan(&self.routes, revision, &classification, &transitions);
        for alter in &self.alters {
            alter(&mut actions, revision);
        }

        Ok(SidebarContents { info, actions })
    }

    /// Sidebar title for an entity
    pub fn title(&self, entity_type: &str, id: u64) -> Result<String, ModerationError> {
        let revision = self.storage.load(entity_type, id)?;
        Ok(format!("Moderate {}", revision.type_label))
    }

    /// Whether the sidebar applies to this entity at all.
    /// Unmoderated entities are denied, not failed.
    pub fn access(&self, entity_type: &str, id: u64) -> Result<bool, ModerationError> {
        let revision = self.storage.load(entity_type, id)?;
        Ok(revision.is_moderated())
    }

    /// Submit handler for the transition panel. Operates on the
    /// latest revision, re-fetched here so the valid set reflects
    /// the live state rather than the one rendered into the form.
    pub fn submit_transition(
        &self,
        entity_type: &str,
        id: u64,
        actor: &Actor,
        transition_id: &str,
    ) -> Result<TransitionOutcome, ModerationError> {
        let revision = self.storage.load_latest_revision(entity_type, id)?;
        self.executor.apply_transition(
            &self.storage,
            &self.workflow,
            &self.authz,
            &self.routes,
            &revision,
            actor,
            transition_id,
        )
    }

    /// Submit handler for the quick-draft button
    pub fn submit_quick_draft(
        &self,
        entity_type: &str,
        id: u64,
        actor: &Actor,
    ) -> Result<TransitionOutcome, ModerationError> {
        let revision = self.storage.load_latest_revision(entity_type, id)?;
        self.executor.quick_draft(
            &self.storage,
            &self.workflow,
            &self.authz,
            &self.routes,
            &revision,
            actor,
        )
    }

    /// Submit handler for the discard-draft button
    pub fn submit_discard_draft(
        &self,
        entity_type: &str,
        id: u64,
        actor: &Actor,
    ) -> Result<TransitionOutcome, ModerationError> {
        let revision = self.storage.load_latest_revision(entity_type, id)?;
        self.executor.discard_draft(
            &self.storage,
            &self.workflow,
            &self.routes,
            &revision,
            actor,
        )
    }
}
