//! Showroom session state and its transitions.
//!
//! `ShowroomState` is the single owner of scene, selection, cart and cart-panel
//! visibility. Views read it; every change goes through one of the methods
//! below. Methods that move the selection return the camera directive the
//! renderer has to follow, or `None` when the framing does not change.

use serde::Serialize;
use std::sync::Arc;

use crate::camera::CameraDirective;
use crate::cart::CartItem;
use crate::product::Product;
use crate::scene::SceneType;

/// Process-wide session state. Memory only, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowroomState {
    current_scene: SceneType,
    selected_product: Option<Arc<Product>>,
    cart: Vec<CartItem>,
    is_cart_open: bool,
}

impl ShowroomState {
    /// Session start: HOME, nothing selected, empty closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts in a specific scene with otherwise initial values.
    pub fn with_scene(scene: SceneType) -> Self {
        Self {
            current_scene: scene,
            ..Self::default()
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn selected_product(&self) -> Option<&Arc<Product>> {
        self.selected_product.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_product.as_deref().map(|p| p.id.as_str())
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    /// Sum of quantities across the cart.
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` across the cart.
    pub fn subtotal(&self) -> u64 {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Switches rooms. Always drops the selection and resets the camera.
    pub fn change_scene(&mut self, scene: SceneType) -> CameraDirective {
        self.current_scene = scene;
        self.selected_product = None;
        CameraDirective::overview()
    }

    /// Selects a product from the active scene and frames it.
    pub fn select_product(&mut self, product: Arc<Product>) -> CameraDirective {
        let directive = CameraDirective::focus(&product);
        self.selected_product = Some(product);
        directive
    }

    /// Leaves the detail view. Returns a directive only if something was selected.
    pub fn clear_selection(&mut self) -> Option<CameraDirective> {
        self.selected_product
            .take()
            .map(|_| CameraDirective::overview())
    }

    /// Adds one unit of `product`, then clears the selection and opens the cart.
    ///
    /// An existing line keeps its position and only gains quantity.
    pub fn add_to_cart(&mut self, product: Arc<Product>) -> Option<CameraDirective> {
        match self.cart.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.adjust(1),
            None => self.cart.push(CartItem::new(product)),
        }
        let directive = self.clear_selection();
        self.is_cart_open = true;
        directive
    }

    /// Changes a line's quantity by `delta`, never below 1. Unknown ids are ignored.
    ///
    /// Returns whether a line was found.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> bool {
        match self.cart.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.adjust(delta);
                true
            }
            None => false,
        }
    }

    /// Drops the line with `id`. Unknown ids are ignored.
    ///
    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        let before = self.cart.len();
        self.cart.retain(|item| item.id() != id);
        self.cart.len() != before
    }

    pub fn toggle_cart(&mut self) {
        self.is_cart_open = !self.is_cart_open;
    }

    pub fn close_cart(&mut self) {
        self.is_cart_open = false;
    }
}
