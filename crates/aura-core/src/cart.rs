//! Cart line items.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::product::Product;

/// A product in the cart together with how many of it were ordered.
///
/// `quantity` never drops below 1; removing a line is a separate operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Arc<Product>,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Arc<Product>) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }

    /// Applies `delta`, clamping at 1 (and at `u32::MAX` on the way up).
    pub fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta);
        self.quantity = next.clamp(1, i64::from(u32::MAX)) as u32;
    }
}
