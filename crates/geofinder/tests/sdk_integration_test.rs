//! Full-stack integration tests wiring every SDK layer together

use std::sync::Arc;

use tempfile::TempDir;

use geofinder::{
    ApplicationConfig, Coordinate, DefaultLocationProvider, FavoriteRecord, FeedbackEvent,
    SearchResultType, ServiceProvider,
};
use geofinder_engine::test_utils::{DelegateEvent, DelegateStub, next_event};
use geofinder_native::stub::{CoreSearchEngineStub, samples};
use geofinder_storage::FAVORITES_LAYER_ID;
use geofinder_telemetry::test_utils::TelemetrySinkStub;
use geofinder_test_utils::get_test_runtime;

fn provider_in(dir: &TempDir) -> ServiceProvider {
    let mut config = ApplicationConfig::with_access_token("integration-token");
    config.storage.directory = Some(dir.path().to_path_buf());
    ServiceProvider::new(config).expect("service provider")
}

#[test]
fn test_search_select_and_feedback_flow() {
    get_test_runtime().block_on(async {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);

        let stub = Arc::new(CoreSearchEngineStub::new("placeholder").with_response(
            samples::success_response(
                samples::sample_request("coffee"),
                samples::make_mixed_results_set(),
            ),
        ));
        let (delegate, mut rx) = DelegateStub::new();
        let engine = provider.search_engine(Arc::clone(&stub) as _, delegate.clone());

        // The configured access token reached the engine
        assert_eq!(stub.access_token(), "integration-token");

        engine.search("coffee");
        let suggestion_ids = match next_event(&mut rx).await {
            DelegateEvent::SuggestionsUpdated(ids) => ids,
            other => panic!("expected suggestions update, got {other:?}"),
        };
        assert!(!suggestion_ids.is_empty());

        // Resolve the first suggestion and observe history being recorded
        let selected = engine.suggestions().first().cloned().expect("suggestion");
        stub.set_response(Some(samples::success_response(
            samples::sample_request("coffee"),
            vec![samples::make_resolved_poi(selected.id())],
        )));
        engine.select(selected.clone());

        match next_event(&mut rx).await {
            DelegateEvent::ResultResolved(id) => assert_eq!(id, selected.id()),
            other => panic!("expected resolved result, got {other:?}"),
        }
        assert_eq!(
            provider
                .history()
                .records()
                .iter()
                .map(|record| record.id.clone())
                .collect::<Vec<_>>(),
            vec![selected.id().to_string()]
        );
        assert!(dir.path().join("history.records").exists());

        // Close the loop with feedback about the resolved result
        let sink = TelemetrySinkStub::new();
        let manager = provider.feedback_manager(
            Arc::clone(&stub) as _,
            Arc::clone(&sink) as _,
            Arc::new(DefaultLocationProvider),
        );
        let resolved = delegate.resolved_result().expect("resolved result");
        let event = FeedbackEvent::from_result(&resolved, "integration", Some("works"));
        manager.send_event(&event, false).expect("feedback");

        let enqueued = sink.last_event().expect("feedback event");
        assert_eq!(enqueued.name, "search.feedback");
        assert_eq!(
            enqueued.attributes["feedbackReason"],
            serde_json::Value::from("integration")
        );
    });
}

#[test]
fn test_favorites_surface_as_user_record_suggestions() {
    get_test_runtime().block_on(async {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);

        provider
            .favorites()
            .add(FavoriteRecord {
                id: "fav-1".to_string(),
                name: "Home".to_string(),
                coordinate: Coordinate::new(53.89, 27.55),
                address: None,
                icon_name: None,
                categories: Vec::new(),
                result_type: SearchResultType::Poi,
                metadata: None,
            })
            .expect("add favorite");

        let stub = Arc::new(CoreSearchEngineStub::new("placeholder").with_response(
            samples::success_response(
                samples::sample_request("home"),
                vec![samples::make_user_record("fav-1", FAVORITES_LAYER_ID)],
            ),
        ));
        let (delegate, mut rx) = DelegateStub::new();
        let engine = provider.search_engine(Arc::clone(&stub) as _, delegate.clone());

        engine.search("home");
        match next_event(&mut rx).await {
            DelegateEvent::SuggestionsUpdated(ids) => {
                assert_eq!(ids, vec!["fav-1".to_string()]);
            }
            other => panic!("expected suggestions update, got {other:?}"),
        }

        // The favorite resolves locally, keeping its user-chosen name
        let selected = engine.suggestions().first().cloned().expect("suggestion");
        engine.select(selected);
        match next_event(&mut rx).await {
            DelegateEvent::ResultResolved(id) => assert_eq!(id, "fav-1"),
            other => panic!("expected resolved result, got {other:?}"),
        }
        assert_eq!(
            delegate.resolved_result().map(|result| result.name),
            Some("Home".to_string())
        );
    });
}
