// Tests for the transition executor and the sidebar controller

#[cfg(test)]
mod tests {
    use crate::config::PresentationConfig;
    use crate::revision::Actor;
    use crate::sidebar::controller::ModerationSidebar;
    use crate::sidebar::errors::ModerationError;
    use crate::sidebar::executor::{
        TransitionExecutor, DRAFT_DISCARDED_MESSAGE, STATE_UPDATED_MESSAGE,
    };
    use crate::sidebar::mocks::*;
    use crate::sidebar::planner::ActionKind;

    fn published_entity(storage: &MockContentStorage) {
        let revision = MockContentStorage::published_revision(1, 1);
        storage.insert_entity(revision.clone(), revision);
    }

    fn entity_with_pending_draft(storage: &MockContentStorage) {
        let published = MockContentStorage::published_revision(1, 1);
        let draft = MockContentStorage::draft_revision(1, 2);
        storage.insert_entity(published, draft);
    }

    // ── TransitionExecutor ───────────────────────────────────────────

    #[test]
    fn test_apply_transition_mutates_state_and_audit_message() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let revision = MockContentStorage::published_revision(1, 1);

        let outcome = TransitionExecutor::new()
            .apply_transition(
                &storage,
                &workflow,
                &authz,
                &routes,
                &revision,
                &actor,
                "published_draft",
            )
            .unwrap();

        let saved = storage.saved_revisions();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].moderation_state.as_deref(), Some("draft"));
        assert_eq!(
            saved[0].audit_message,
            "Used the moderation sidebar to change the state to \"Draft\"."
        );

        assert_eq!(outcome.to_state.id, "draft");
        assert_eq!(outcome.redirect, "/article/1/latest");
        assert_eq!(outcome.message, STATE_UPDATED_MESSAGE);
    }

    #[test]
    fn test_publishing_transition_redirects_to_live_view() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let draft = MockContentStorage::draft_revision(1, 2);

        let outcome = TransitionExecutor::new()
            .apply_transition(
                &storage,
                &workflow,
                &authz,
                &routes,
                &draft,
                &actor,
                "draft_published",
            )
            .unwrap();

        assert_eq!(outcome.to_state.id, "published");
        assert!(outcome.to_state.published);
        assert_eq!(outcome.redirect, "/article/1");
    }

    #[test]
    fn test_stale_transition_is_rejected_without_mutation() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::new();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let revision = MockContentStorage::published_revision(1, 1);

        let result = TransitionExecutor::new().apply_transition(
            &storage,
            &workflow,
            &authz,
            &routes,
            &revision,
            &actor,
            "published_draft",
        );

        match result {
            Err(ModerationError::InvalidTransition { control }) => {
                assert_eq!(control, "published_draft");
            }
            other => panic!("Expected InvalidTransition, got: {other:?}"),
        }
        assert!(storage.saved_revisions().is_empty());
    }

    #[test]
    fn test_invalid_transition_renders_as_form_error() {
        let error = ModerationError::InvalidTransition {
            control: "published_draft".to_string(),
        };
        assert!(error.is_form_error());
    }

    #[test]
    fn test_quick_draft_skips_audit_log() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let revision = MockContentStorage::published_revision(1, 1);

        let outcome = TransitionExecutor::new()
            .quick_draft(&storage, &workflow, &authz, &routes, &revision, &actor)
            .unwrap();

        let saved = storage.saved_revisions();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].moderation_state.as_deref(), Some("draft"));
        assert_eq!(saved[0].audit_message, "");

        // Quick drafts always land on the latest-version view.
        assert_eq!(outcome.redirect, "/article/1/latest");
        assert_eq!(outcome.message, STATE_UPDATED_MESSAGE);
    }

    #[test]
    fn test_quick_draft_with_no_valid_transitions_fails_cleanly() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::new();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("viewer");
        let revision = MockContentStorage::published_revision(1, 1);

        let result = TransitionExecutor::new().quick_draft(
            &storage, &workflow, &authz, &routes, &revision, &actor,
        );

        match result {
            Err(ModerationError::InvalidTransition { control }) => {
                assert_eq!(control, "create_draft");
            }
            other => panic!("Expected InvalidTransition, got: {other:?}"),
        }
        assert!(storage.saved_revisions().is_empty());
    }

    #[test]
    fn test_discard_draft_restores_default_state() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let draft = MockContentStorage::draft_revision(1, 2);

        let outcome = TransitionExecutor::new()
            .discard_draft(&storage, &workflow, &routes, &draft, &actor)
            .unwrap();

        let saved = storage.saved_revisions();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].moderation_state.as_deref(), Some("published"));
        assert_eq!(
            saved[0].audit_message,
            "Used the moderation sidebar to discard the current draft."
        );

        assert_eq!(outcome.redirect, "/article/1");
        assert_eq!(outcome.message, DRAFT_DISCARDED_MESSAGE);
    }

    #[test]
    fn test_discard_draft_rejected_on_default_revision() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let revision = MockContentStorage::published_revision(1, 1);

        let result = TransitionExecutor::new().discard_draft(
            &storage, &workflow, &routes, &revision, &actor,
        );

        assert!(matches!(
            result,
            Err(ModerationError::InvalidTransition { .. })
        ));
        assert!(storage.saved_revisions().is_empty());
    }

    #[test]
    fn test_persistence_failure_propagates_as_fatal() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        storage.fail_next_save();
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let actor = Actor::new("editor");
        let revision = MockContentStorage::published_revision(1, 1);

        let result = TransitionExecutor::new().apply_transition(
            &storage,
            &workflow,
            &authz,
            &routes,
            &revision,
            &actor,
            "published_draft",
        );

        let error = result.unwrap_err();
        match &error {
            ModerationError::PersistenceFailure { revision_id, .. } => {
                assert_eq!(*revision_id, 1);
            }
            other => panic!("Expected PersistenceFailure, got: {other:?}"),
        }
        // Not a form-field error; the host shows its fatal error page.
        assert!(!error.is_form_error());
    }

    // ── ModerationSidebar ────────────────────────────────────────────

    fn sidebar<'a>(
        storage: &'a MockContentStorage,
        workflow: &'a MockWorkflowProvider,
        authz: &'a MockAuthorization,
        routes: &'a MockRouteResolver,
    ) -> ModerationSidebar<
        &'a MockContentStorage,
        &'a MockWorkflowProvider,
        &'a MockAuthorization,
        &'a MockRouteResolver,
    > {
        ModerationSidebar::new(storage, workflow, authz, routes)
            .with_presentation(PresentationConfig::default())
    }

    #[test]
    fn test_contents_for_live_revision() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        let contents = sidebar
            .contents("article", 1, &Actor::new("editor"))
            .unwrap();

        assert_eq!(contents.info.state_label, "Published");
        assert_eq!(contents.info.title, "Llama care basics");
        assert!(contents.actions.contains_kind(ActionKind::CreateDraft));
        assert!(contents.actions.contains_kind(ActionKind::Delete));
        assert!(contents.actions.transition_controls().is_empty());
    }

    #[test]
    fn test_contents_for_latest_shows_draft_panel() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        let contents = sidebar
            .contents_for_latest("article", 1, &Actor::new("editor"))
            .unwrap();

        assert_eq!(contents.info.state_label, "Draft");
        assert!(!contents.actions.contains_kind(ActionKind::CreateDraft));
        assert_eq!(contents.actions.transition_controls().len(), 2);
        assert!(contents.actions.contains_kind(ActionKind::DiscardDraft));
    }

    #[test]
    fn test_title() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        assert_eq!(sidebar.title("article", 1).unwrap(), "Moderate Article");
    }

    #[test]
    fn test_access_denied_for_unmoderated_entity() {
        let storage = MockContentStorage::new();
        let mut revision = MockContentStorage::published_revision(1, 1);
        revision.moderation_state = None;
        storage.insert_entity(revision.clone(), revision);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        // Denied, not an error.
        assert!(!sidebar.access("article", 1).unwrap());
    }

    #[test]
    fn test_access_granted_for_moderated_entity() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        assert!(sidebar.access("article", 1).unwrap());
    }

    #[test]
    fn test_alter_chain_runs_in_registration_order() {
        let storage = MockContentStorage::new();
        published_entity(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let mut sidebar = sidebar(&storage, &workflow, &authz, &routes);

        sidebar.add_alter(|actions, _revision| {
            for action in &mut actions.actions {
                action.label = action.label.to_uppercase();
            }
        });
        sidebar.add_alter(|actions, revision| {
            for action in &mut actions.actions {
                action.label = format!("{} [{}]", action.label, revision.entity_id);
            }
        });

        let contents = sidebar
            .contents("article", 1, &Actor::new("editor"))
            .unwrap();

        // Second alter saw the first alter's output.
        assert!(contents
            .actions
            .iter()
            .all(|a| a.label.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())));
        assert!(contents.actions.iter().all(|a| a.label.ends_with("[1]")));
    }

    #[test]
    fn test_submit_revalidates_against_live_permissions() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::new();
        authz.permit("editor", "draft_published");
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);
        let actor = Actor::new("editor");

        // Rendered while the permission was present.
        let contents = sidebar.contents_for_latest("article", 1, &actor).unwrap();
        assert_eq!(contents.actions.transition_controls().len(), 1);

        // Permission revoked between render and submit.
        authz.revoke("editor", "draft_published");
        let result = sidebar.submit_transition("article", 1, &actor, "draft_published");

        assert!(matches!(
            result,
            Err(ModerationError::InvalidTransition { .. })
        ));
        assert!(storage.saved_revisions().is_empty());
    }

    #[test]
    fn test_submit_operates_on_latest_revision() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        let outcome = sidebar
            .submit_transition("article", 1, &Actor::new("editor"), "draft_published")
            .unwrap();

        // The pending draft (revision 2), not the default revision,
        // is what got published.
        let saved = storage.saved_revisions();
        assert_eq!(saved[0].revision_id, 2);
        assert_eq!(outcome.to_state.id, "published");
    }

    #[test]
    fn test_submit_discard_draft_via_controller() {
        let storage = MockContentStorage::new();
        entity_with_pending_draft(&storage);
        let workflow = MockWorkflowProvider::with_editorial_graph();
        let authz = MockAuthorization::allow_all();
        let routes = MockRouteResolver::new();
        let sidebar = sidebar(&storage, &workflow, &authz, &routes);

        let outcome = sidebar
            .submit_discard_draft("article", 1, &Actor::new("editor"))
            .unwrap();

        assert_eq!(outcome.message, DRAFT_DISCARDED_MESSAGE);
        assert_eq!(outcome.redirect, "/article/1");
    }
}
