//! Read-only projections of session state for the panels.

use aura_core::{Product, SceneType, ShowroomState};
use serde::Serialize;
use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::insight_tracker::InsightState;

/// Hint shown while a product is in focus.
pub const HINT_SELECTED: &str = "Click Back to Gallery to reset view";
/// Hint shown in the overview.
pub const HINT_GALLERY: &str = "Scroll to Zoom • Drag to Rotate • Click items to inspect";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTab {
    pub scene: SceneType,
    pub label: &'static str,
    pub active: bool,
}

/// Scene switcher and cart badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarView {
    pub tabs: Vec<SceneTab>,
    pub cart_count: u64,
    /// Badge is hidden when the cart is empty.
    pub show_badge: bool,
}

impl NavbarView {
    pub fn from_state(state: &ShowroomState) -> Self {
        let cart_count = state.cart_count();
        Self {
            tabs: SceneType::iter()
                .map(|scene| SceneTab {
                    scene,
                    label: scene.label(),
                    active: scene == state.current_scene(),
                })
                .collect(),
            cart_count,
            show_badge: cart_count > 0,
        }
    }
}

/// Insight area of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum InsightView {
    Loading,
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product: Arc<Product>,
    pub insight: InsightView,
}

impl ProductDetailView {
    /// `None` when nothing is selected.
    pub fn from_state(state: &ShowroomState, insight: &InsightState) -> Option<Self> {
        let product = state.selected_product()?.clone();
        let insight = match insight {
            InsightState::Ready { product_id, text } if *product_id == product.id => {
                InsightView::Text(text.clone())
            }
            _ => InsightView::Loading,
        };
        Some(Self { product, insight })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
    /// Decrement is disabled at the quantity floor.
    pub can_decrement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub is_open: bool,
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: u64,
}

impl CartView {
    pub fn from_state(state: &ShowroomState) -> Self {
        Self {
            is_open: state.is_cart_open(),
            lines: state
                .cart()
                .iter()
                .map(|item| CartLineView {
                    id: item.product.id.clone(),
                    name: item.product.name.clone(),
                    category: item.product.category.clone(),
                    unit_price: item.product.price,
                    quantity: item.quantity,
                    line_total: item.line_total(),
                    can_decrement: item.quantity > 1,
                })
                .collect(),
            item_count: state.cart_count(),
            subtotal: state.subtotal(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Bottom-of-screen hint for the current mode.
pub fn hint(state: &ShowroomState) -> &'static str {
    if state.selected_product().is_some() {
        HINT_SELECTED
    } else {
        HINT_GALLERY
    }
}

/// Formats whole currency units with thousands separators, e.g. `$5,500`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
