use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aura_application::insight_service::{FALLBACK_FAILURE, InsightService};
use aura_application::views::InsightView;
use aura_application::{Effect, InsightState, InsightTicket, ShowroomSession};
use aura_core::camera::FOCUS_OFFSET;
use aura_core::config::InsightConfig;
use aura_core::{CameraDirective, Product, SceneType, Vec3};
use aura_infrastructure::StaticCatalogRepository;
use aura_interaction::{Agent, AgentError, GenerationRequest};
use tokio::sync::oneshot;

fn session() -> ShowroomSession {
    let catalog = StaticCatalogRepository::seeded().expect("seed catalog is valid");
    ShowroomSession::new(Arc::new(catalog), SceneType::Home)
}

fn insight_request(effects: &[Effect]) -> (InsightTicket, Arc<Product>) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::RequestInsight { ticket, product } => Some((ticket.clone(), product.clone())),
            _ => None,
        })
        .expect("selection should request an insight")
}

#[test]
fn test_home_scenario_subtotal() {
    let mut session = session();
    assert_eq!(session.products().len(), 6);

    session.select_product("h1").unwrap();
    session.add_selected_to_cart().unwrap();
    session.select_product("h2").unwrap();
    session.add_selected_to_cart().unwrap();
    session.select_product("h2").unwrap();
    session.add_selected_to_cart().unwrap();

    let cart = session.cart_view();
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.subtotal, 3200 + 2300);
    assert_eq!(cart.subtotal, 5500);
    assert_eq!(session.navbar_view().cart_count, 3);
}

#[test]
fn test_add_always_closes_detail_and_opens_cart() {
    let mut session = session();
    session.toggle_cart();
    session.toggle_cart();
    session.select_product("h4").unwrap();

    let effects = session.add_selected_to_cart().unwrap();

    assert_eq!(effects, vec![Effect::Camera(CameraDirective::overview())]);
    assert!(session.state().selected_product().is_none());
    assert!(session.state().is_cart_open());
    assert!(session.detail_view().is_none());
    assert_eq!(session.insight_state(), &InsightState::Idle);
}

#[test]
fn test_add_without_selection_is_rejected_without_change() {
    let mut session = session();
    let err = session.add_selected_to_cart().unwrap_err();
    assert!(err.is_not_found());
    assert!(session.state().cart().is_empty());
    assert!(!session.state().is_cart_open());
}

#[test]
fn test_change_scene_always_clears_selection() {
    let mut session = session();
    session.select_product("h3").unwrap();

    let effects = session.change_scene(SceneType::Studio);

    assert_eq!(
        effects,
        vec![
            Effect::Camera(CameraDirective::overview()),
            Effect::LoadScene(SceneType::Studio)
        ]
    );
    assert!(session.state().selected_product().is_none());
    assert_eq!(session.products().len(), 3);

    // Switching with nothing selected still resets the camera
    let effects = session.change_scene(SceneType::Office);
    assert!(matches!(effects[0], Effect::Camera(CameraDirective::Default { .. })));
}

#[test]
fn test_select_is_scoped_to_active_scene() {
    let mut session = session();
    session.change_scene(SceneType::Office);

    let err = session.select_product("h1").unwrap_err();
    assert!(err.is_not_found());
    assert!(session.state().selected_product().is_none());

    let effects = session.select_product("o3").unwrap();
    match &effects[0] {
        Effect::Camera(CameraDirective::Focus { product_id, eye, target }) => {
            assert_eq!(product_id, "o3");
            assert_eq!(*target, Vec3::new(1.2, 0.8, -1.0));
            assert_eq!(*eye, *target + FOCUS_OFFSET);
        }
        other => panic!("expected focus directive, got {other:?}"),
    }
}

#[test]
fn test_quantity_floor_and_remove_idempotence() {
    let mut session = session();
    session.select_product("h6").unwrap();
    session.add_selected_to_cart().unwrap();

    assert!(session.update_quantity("h6", -50));
    assert_eq!(session.state().cart()[0].quantity, 1);
    assert!(!session.cart_view().lines[0].can_decrement);

    assert!(!session.update_quantity("missing", 1));
    assert!(session.remove_from_cart("h6"));
    assert!(!session.remove_from_cart("h6"));
    assert!(session.cart_view().is_empty());
}

#[test]
fn test_clear_selection_returns_to_overview() {
    let mut session = session();
    assert!(session.clear_selection().is_empty());

    session.select_product("h2").unwrap();
    assert_eq!(
        session.clear_selection(),
        vec![Effect::Camera(CameraDirective::overview())]
    );
    assert_eq!(session.hint(), aura_application::views::HINT_GALLERY);
}

#[test]
fn test_stale_insight_does_not_overwrite_newer_selection() {
    let mut session = session();
    let (ticket_a, _) = insight_request(&session.select_product("h1").unwrap());
    let (ticket_b, _) = insight_request(&session.select_product("h2").unwrap());

    assert!(!session.apply_insight(&ticket_a, "About the sofa".to_string()));
    let view = session.detail_view().unwrap();
    assert_eq!(view.product.id, "h2");
    assert_eq!(view.insight, InsightView::Loading);

    assert!(session.apply_insight(&ticket_b, "About the table".to_string()));
    assert_eq!(
        session.detail_view().unwrap().insight,
        InsightView::Text("About the table".to_string())
    );
}

#[test]
fn test_insight_after_deselect_is_dropped() {
    let mut session = session();
    let (ticket, _) = insight_request(&session.select_product("h1").unwrap());
    session.clear_selection();

    assert!(!session.apply_insight(&ticket, "late".to_string()));
    assert!(session.detail_view().is_none());
}

/// Agent whose replies are released by the test, one per product name.
struct GatedAgent {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<String, AgentError>>>>,
}

#[async_trait]
impl Agent for GatedAgent {
    fn expertise(&self) -> &str {
        "gated"
    }

    async fn execute(&self, request: GenerationRequest) -> Result<String, AgentError> {
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let key = gates
                .keys()
                .find(|name| request.prompt.contains(name.as_str()))
                .cloned()
                .expect("unexpected prompt");
            gates.remove(&key).unwrap()
        };
        gate.await
            .unwrap_or_else(|_| Err(AgentError::Other("gate dropped".to_string())))
    }
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_latest_selection() {
    let (release_sofa, sofa_gate) = oneshot::channel();
    let (release_table, table_gate) = oneshot::channel();
    let agent = Arc::new(GatedAgent {
        gates: Mutex::new(HashMap::from([
            ("Verdant Bay Sofa".to_string(), sofa_gate),
            ("Midnight Drum Table".to_string(), table_gate),
        ])),
    });
    let service = Arc::new(InsightService::new(agent, InsightConfig::default()));
    let mut session = session();

    let spawn = |ticket: InsightTicket, product: Arc<Product>| {
        let service = service.clone();
        tokio::spawn(async move { (ticket, service.get_insight(&product).await) })
    };

    let (ticket_a, product_a) = insight_request(&session.select_product("h1").unwrap());
    let call_a = spawn(ticket_a, product_a);
    let (ticket_b, product_b) = insight_request(&session.select_product("h2").unwrap());
    let call_b = spawn(ticket_b, product_b);

    release_table.send(Ok("Table copy.".to_string())).unwrap();
    let (ticket, text) = call_b.await.unwrap();
    assert!(session.apply_insight(&ticket, text));

    release_sofa.send(Ok("Sofa copy.".to_string())).unwrap();
    let (ticket, text) = call_a.await.unwrap();
    assert!(!session.apply_insight(&ticket, text));

    let view = session.detail_view().unwrap();
    assert_eq!(view.product.id, "h2");
    assert_eq!(view.insight, InsightView::Text("Table copy.".to_string()));
}

#[tokio::test]
async fn test_failed_insight_shows_fallback_and_clears_loading() {
    let (release, gate) = oneshot::channel();
    let agent = Arc::new(GatedAgent {
        gates: Mutex::new(HashMap::from([("Cloud Bouclé Lounge".to_string(), gate)])),
    });
    let service = InsightService::new(agent, InsightConfig::default());
    let mut session = session();

    let (ticket, product) = insight_request(&session.select_product("h4").unwrap());
    assert!(session.insight_state().is_loading());

    release
        .send(Err(AgentError::ProcessError {
            status_code: Some(500),
            message: "INTERNAL".to_string(),
            is_retryable: true,
            retry_after: None,
        }))
        .unwrap();
    let text = service.get_insight(&product).await;

    assert!(session.apply_insight(&ticket, text));
    assert!(!session.insight_state().is_loading());
    assert_eq!(
        session.detail_view().unwrap().insight,
        InsightView::Text(FALLBACK_FAILURE.to_string())
    );
}

#[test]
fn test_start_effects() {
    let session = session();
    assert_eq!(
        session.start(),
        vec![
            Effect::Camera(CameraDirective::overview()),
            Effect::LoadScene(SceneType::Home)
        ]
    );
}
