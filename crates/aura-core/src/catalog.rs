//! Catalog lookup contract.

use std::sync::Arc;

use crate::error::{AuraError, Result};
use crate::product::Product;
use crate::scene::SceneType;

/// Read-only product table keyed by scene.
///
/// Implementations guarantee that product ids are unique across every scene,
/// so cart de-duplication by id is unambiguous.
pub trait CatalogRepository: Send + Sync {
    /// Products of `scene` in display order.
    fn products_for(&self, scene: SceneType) -> &[Arc<Product>];

    /// Looks a product up within one scene.
    fn find_in_scene(&self, scene: SceneType, id: &str) -> Option<Arc<Product>> {
        self.products_for(scene)
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    /// Like `find_in_scene`, but reports a `NotFound` error for unknown ids.
    fn require_in_scene(&self, scene: SceneType, id: &str) -> Result<Arc<Product>> {
        self.find_in_scene(scene, id)
            .ok_or_else(|| AuraError::not_found("product", id))
    }
}
