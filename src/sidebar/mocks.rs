// Mock collaborators for testing - no side effects outside the mock

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::revision::{Actor, ContentRevision};
use crate::sidebar::traits::*;
use crate::workflow::{ModerationState, Transition};

/// Mock content storage holding one default and one latest revision
/// per entity. Saves are recorded, not applied; tests that need real
/// revisioning semantics model them in their own fixtures.
#[derive(Debug)]
pub struct MockContentStorage {
    default_revisions: RefCell<HashMap<(String, u64), ContentRevision>>,
    latest_revisions: RefCell<HashMap<(String, u64), ContentRevision>>,
    saved: RefCell<Vec<ContentRevision>>,
    fail_next_save: RefCell<bool>,
}

impl Default for MockContentStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContentStorage {
    pub fn new() -> Self {
        Self {
            default_revisions: RefCell::new(HashMap::new()),
            latest_revisions: RefCell::new(HashMap::new()),
            saved: RefCell::new(Vec::new()),
            fail_next_save: RefCell::new(false),
        }
    }

    pub fn insert_entity(&self, default: ContentRevision, latest: ContentRevision) {
        let key = (default.entity_type.clone(), default.entity_id);
        self.default_revisions.borrow_mut().insert(key.clone(), default);
        self.latest_revisions.borrow_mut().insert(key, latest);
    }

    pub fn saved_revisions(&self) -> Vec<ContentRevision> {
        self.saved.borrow().clone()
    }

    pub fn fail_next_save(&self) {
        *self.fail_next_save.borrow_mut() = true;
    }

    /// A published, default revision fixture
    pub fn published_revision(entity_id: u64, revision_id: u64) -> ContentRevision {
        ContentRevision {
            entity_type: "article".to_string(),
            type_label: "Article".to_string(),
            entity_id,
            revision_id,
            title: "Llama care basics".to_string(),
            moderation_state: Some("published".to_string()),
            is_default: true,
            revision_log: None,
            changed: None,
            audit_message: String::new(),
        }
    }

    /// A pending draft fixture: latest but not default
    pub fn draft_revision(entity_id: u64, revision_id: u64) -> ContentRevision {
        ContentRevision {
            moderation_state: Some("draft".to_string()),
            is_default: false,
            ..Self::published_revision(entity_id, revision_id)
        }
    }
}

impl ContentStorage for MockContentStorage {
    fn load(&self, entity_type: &str, id: u64) -> Result<ContentRevision> {
        self.default_revisions
            .borrow()
            .get(&(entity_type.to_string(), id))
            .cloned()
            .ok_or_else(|| anyhow!("no such entity: {entity_type}/{id}"))
    }

    fn load_latest_revision(&self, entity_type: &str, id: u64) -> Result<ContentRevision> {
        self.latest_revisions
            .borrow()
            .get(&(entity_type.to_string(), id))
            .cloned()
            .ok_or_else(|| anyhow!("no such entity: {entity_type}/{id}"))
    }

    fn save(&self, revision: &ContentRevision) -> Result<()> {
        if *self.fail_next_save.borrow() {
            *self.fail_next_save.borrow_mut() = false;
            return Err(anyhow!("storage backend unavailable"));
        }
        self.saved.borrow_mut().push(revision.clone());
        Ok(())
    }

    fn is_latest_revision(&self, revision: &ContentRevision) -> Result<bool> {
        let key = (revision.entity_type.clone(), revision.entity_id);
        self.latest_revisions
            .borrow()
            .get(&key)
            .map(|latest| latest.revision_id == revision.revision_id)
            .ok_or_else(|| {
                anyhow!(
                    "no such entity: {}/{}",
                    revision.entity_type,
                    revision.entity_id
                )
            })
    }
}

/// Mock workflow-definition store backed by in-memory state and
/// transition lists. Transition order is insertion order, standing in
/// for graph-definition order.
#[derive(Debug)]
pub struct MockWorkflowProvider {
    states: RefCell<HashMap<String, ModerationState>>,
    transitions: RefCell<Vec<Transition>>,
    loaded_states: RefCell<Vec<String>>,
}

impl Default for MockWorkflowProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWorkflowProvider {
    pub fn new() -> Self {
        Self {
            states: RefCell::new(HashMap::new()),
            transitions: RefCell::new(Vec::new()),
            loaded_states: RefCell::new(Vec::new()),
        }
    }

    pub fn add_state(&self, state: ModerationState) {
        self.states.borrow_mut().insert(state.id.clone(), state);
    }

    pub fn add_transition(&self, transition: Transition) {
        self.transitions.borrow_mut().push(transition);
    }

    pub fn loaded_states(&self) -> Vec<String> {
        self.loaded_states.borrow().clone()
    }

    /// The usual draft/published/archived editorial graph, including
    /// the self-transitions real workflows carry
    pub fn with_editorial_graph() -> Self {
        let workflow = Self::new();
        workflow.add_state(ModerationState::new("draft", "Draft", false));
        workflow.add_state(ModerationState::new("published", "Published", true));
        workflow.add_state(ModerationState::new("archived", "Archived", false));

        workflow.add_transition(Transition::new(
            "draft_draft",
            "Create New Draft",
            "draft",
            "draft",
        ));
        workflow.add_transition(Transition::new(
            "draft_published",
            "Publish",
            "draft",
            "published",
        ));
        workflow.add_transition(Transition::new(
            "draft_archived",
            "Archive",
            "draft",
            "archived",
        ));
        workflow.add_transition(Transition::new(
            "published_draft",
            "Create New Draft",
            "published",
            "draft",
        ));
        workflow.add_transition(Transition::new(
            "published_published",
            "Publish",
            "published",
            "published",
        ));
        workflow.add_transition(Transition::new(
            "published_archived",
            "Archive",
            "published",
            "archived",
        ));
        workflow.add_transition(Transition::new(
            "archived_draft",
            "Restore to Draft",
            "archived",
            "draft",
        ));
        workflow.add_transition(Transition::new(
            "archived_published",
            "Restore",
            "archived",
            "published",
        ));
        workflow
    }
}

impl WorkflowProvider for MockWorkflowProvider {
    fn load_state(&self, id: &str) -> Result<ModerationState> {
        self.loaded_states.borrow_mut().push(id.to_string());
        self.states
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown moderation state: {id}"))
    }

    fn outgoing_transitions(&self, state_id: &str) -> Result<Vec<Transition>> {
        Ok(self
            .transitions
            .borrow()
            .iter()
            .filter(|t| t.from == state_id)
            .cloned()
            .collect())
    }
}

/// Mock authorization with an explicit (actor, transition) allowlist
/// and a record of every check performed
#[derive(Debug)]
pub struct MockAuthorization {
    allow_all: bool,
    permitted: RefCell<HashSet<(String, String)>>,
    checks: RefCell<Vec<(String, String)>>,
}

impl Default for MockAuthorization {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthorization {
    /// Deny everything until permitted
    pub fn new() -> Self {
        Self {
            allow_all: false,
            permitted: RefCell::new(HashSet::new()),
            checks: RefCell::new(Vec::new()),
        }
    }

    /// Permit every transition for every actor
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::new()
        }
    }

    pub fn permit(&self, actor: &str, transition_id: &str) {
        self.permitted
            .borrow_mut()
            .insert((actor.to_string(), transition_id.to_string()));
    }

    pub fn revoke(&self, actor: &str, transition_id: &str) {
        self.permitted
            .borrow_mut()
            .remove(&(actor.to_string(), transition_id.to_string()));
    }

    pub fn checks(&self) -> Vec<(String, String)> {
        self.checks.borrow().clone()
    }
}

impl Authorization for MockAuthorization {
    fn can_use_transition(&self, actor: &Actor, transition: &Transition) -> bool {
        self.checks
            .borrow_mut()
            .push((actor.name.clone(), transition.id.clone()));
        self.allow_all
            || self
                .permitted
                .borrow()
                .contains(&(actor.name.clone(), transition.id.clone()))
    }
}

/// Mock route resolver producing predictable paths
#[derive(Debug, Default)]
pub struct MockRouteResolver;

impl MockRouteResolver {
    pub fn new() -> Self {
        Self
    }
}

impl RouteResolver for MockRouteResolver {
    fn canonical(&self, entity_type: &str, id: u64) -> String {
        format!("/{entity_type}/{id}")
    }

    fn latest_version(&self, entity_type: &str, id: u64) -> String {
        format!("/{entity_type}/{id}/latest")
    }

    fn edit_form(&self, entity_type: &str, id: u64) -> String {
        format!("/{entity_type}/{id}/edit")
    }

    fn delete_form(&self, entity_type: &str, id: u64) -> String {
        format!("/{entity_type}/{id}/delete")
    }
}
