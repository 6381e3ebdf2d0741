//! Showroom Session
//!
//! The event-loop facing side of the application. Front ends translate user
//! intents into calls here and carry out the returned [`Effect`]s: move the
//! camera, start an insight request, or lay out a scene. Completed background
//! work comes back through [`ShowroomSession::apply_insight`].

use aura_core::catalog::CatalogRepository;
use aura_core::{AuraError, CameraDirective, Product, Result, SceneType, ShowroomState};
use std::sync::Arc;

use crate::insight_tracker::{InsightState, InsightTicket, InsightTracker};
use crate::views::{self, CartView, NavbarView, ProductDetailView};

/// Work the front end has to perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Animate the camera toward this framing.
    Camera(CameraDirective),
    /// Fetch an insight in the background and report back with the ticket.
    RequestInsight {
        ticket: InsightTicket,
        product: Arc<Product>,
    },
    /// Build the layout for this scene.
    LoadScene(SceneType),
}

pub struct ShowroomSession {
    catalog: Arc<dyn CatalogRepository>,
    state: ShowroomState,
    insight: InsightTracker,
}

impl ShowroomSession {
    pub fn new(catalog: Arc<dyn CatalogRepository>, scene: SceneType) -> Self {
        Self {
            catalog,
            state: ShowroomState::with_scene(scene),
            insight: InsightTracker::new(),
        }
    }

    /// Effects needed to show the starting scene.
    pub fn start(&self) -> Vec<Effect> {
        vec![
            Effect::Camera(CameraDirective::overview()),
            Effect::LoadScene(self.state.current_scene()),
        ]
    }

    pub fn state(&self) -> &ShowroomState {
        &self.state
    }

    pub fn insight_state(&self) -> &InsightState {
        self.insight.state()
    }

    /// Products of the active scene, in display order.
    pub fn products(&self) -> &[Arc<Product>] {
        self.catalog.products_for(self.state.current_scene())
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    pub fn change_scene(&mut self, scene: SceneType) -> Vec<Effect> {
        tracing::info!("[ShowroomSession] Scene -> {}", scene);
        let directive = self.state.change_scene(scene);
        self.insight.reset();
        vec![Effect::Camera(directive), Effect::LoadScene(scene)]
    }

    /// Selects a product of the active scene by id.
    ///
    /// Unknown ids leave the state untouched and report `NotFound`.
    pub fn select_product(&mut self, id: &str) -> Result<Vec<Effect>> {
        let product = self
            .catalog
            .require_in_scene(self.state.current_scene(), id)?;
        Ok(self.select(product))
    }

    /// Selects a product handed up by a proxy click.
    pub fn select(&mut self, product: Arc<Product>) -> Vec<Effect> {
        tracing::info!("[ShowroomSession] Selected '{}'", product.id);
        let directive = self.state.select_product(product.clone());
        let ticket = self.insight.begin(&product.id);
        vec![
            Effect::Camera(directive),
            Effect::RequestInsight { ticket, product },
        ]
    }

    pub fn clear_selection(&mut self) -> Vec<Effect> {
        self.insight.reset();
        self.state
            .clear_selection()
            .map(Effect::Camera)
            .into_iter()
            .collect()
    }

    /// Adds the product currently in the detail panel.
    pub fn add_selected_to_cart(&mut self) -> Result<Vec<Effect>> {
        let product = self
            .state
            .selected_product()
            .cloned()
            .ok_or_else(|| AuraError::not_found("selection", "none"))?;
        Ok(self.add_to_cart(product))
    }

    pub fn add_to_cart(&mut self, product: Arc<Product>) -> Vec<Effect> {
        tracing::info!("[ShowroomSession] Added '{}' to cart", product.id);
        let directive = self.state.add_to_cart(product);
        self.insight.reset();
        directive.map(Effect::Camera).into_iter().collect()
    }

    /// Unknown ids are a silent no-op; returns whether a line changed.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> bool {
        self.state.update_quantity(id, delta)
    }

    /// Unknown ids are a silent no-op; returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        self.state.remove_from_cart(id)
    }

    pub fn toggle_cart(&mut self) {
        self.state.toggle_cart();
    }

    pub fn close_cart(&mut self) {
        self.state.close_cart();
    }

    /// Delivers a finished insight request. Stale results are discarded.
    pub fn apply_insight(&mut self, ticket: &InsightTicket, text: String) -> bool {
        let selected = self.state.selected_id();
        self.insight.resolve(ticket, text, selected)
    }

    // ============================================================================
    // Views
    // ============================================================================

    pub fn navbar_view(&self) -> NavbarView {
        NavbarView::from_state(&self.state)
    }

    pub fn detail_view(&self) -> Option<ProductDetailView> {
        ProductDetailView::from_state(&self.state, self.insight.state())
    }

    pub fn cart_view(&self) -> CartView {
        CartView::from_state(&self.state)
    }

    pub fn hint(&self) -> &'static str {
        views::hint(&self.state)
    }
}
