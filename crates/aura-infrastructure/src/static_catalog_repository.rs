//! Built-in product table.
//!
//! The seed is compiled in; nothing here touches the network or disk.

use std::collections::{HashMap, HashSet};
use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use aura_core::catalog::CatalogRepository;
use aura_core::{AuraError, Product, ProductType, Result, SceneType, Vec3};

/// Catalog backed by an in-memory table, validated on construction.
#[derive(Debug, Clone)]
pub struct StaticCatalogRepository {
    scenes: HashMap<SceneType, Vec<Arc<Product>>>,
}

impl StaticCatalogRepository {
    /// The showroom's built-in catalog.
    pub fn seeded() -> Result<Self> {
        Self::from_table(vec![
            (SceneType::Home, home_products()),
            (SceneType::Office, office_products()),
            (SceneType::Studio, studio_products()),
        ])
    }

    /// Builds a catalog from explicit lists.
    ///
    /// Fails with a config error if any id appears twice, in the same scene or
    /// across scenes. Scenes missing from `table` have no products.
    pub fn from_table(table: Vec<(SceneType, Vec<Product>)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut scenes = HashMap::new();

        for (scene, products) in table {
            for product in &products {
                if !seen.insert(product.id.clone()) {
                    return Err(AuraError::config(format!(
                        "Duplicate product id '{}' in catalog",
                        product.id
                    )));
                }
            }
            scenes.insert(scene, products.into_iter().map(Arc::new).collect());
        }

        Ok(Self { scenes })
    }

    /// Number of products over all scenes.
    pub fn len(&self) -> usize {
        self.scenes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogRepository for StaticCatalogRepository {
    fn products_for(&self, scene: SceneType) -> &[Arc<Product>] {
        self.scenes.get(&scene).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    price: u64,
    description: &str,
    position: [f32; 3],
    color: &str,
    product_type: ProductType,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: description.to_string(),
        position: position.into(),
        scale: None,
        rotation: None,
        color: color.to_string(),
        product_type,
        model_url: None,
    }
}

trait ProductSeedExt {
    fn scaled(self, scale: [f32; 3]) -> Self;
    fn rotated(self, rotation: [f32; 3]) -> Self;
    fn model(self, url: &str) -> Self;
}

impl ProductSeedExt for Product {
    fn scaled(mut self, scale: [f32; 3]) -> Self {
        self.scale = Some(Vec3::from(scale));
        self
    }

    fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Some(Vec3::from(rotation));
        self
    }

    fn model(mut self, url: &str) -> Self {
        self.model_url = Some(url.to_string());
        self
    }
}

fn home_products() -> Vec<Product> {
    vec![
        product(
            "custom-1",
            "Designer Lounge Chair",
            "Furniture",
            2850,
            "A masterpiece of ergonomics and style, featuring advanced sheen materials.",
            [-2.0, 0.0, -1.0],
            "#FFFFFF",
            ProductType::Chair,
        )
        .rotated([0.0, FRAC_PI_4, 0.0])
        .scaled([2.5, 2.5, 2.5])
        .model("https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/SheenChair/glTF-Binary/SheenChair.glb"),
        product(
            "h1",
            "Verdant Bay Sofa",
            "Seating",
            3200,
            "A custom low-profile sofa with olive green velvet base and eclectic patterned back cushions, designed for bay window integration.",
            [1.5, 0.0, -3.5],
            "#6B8E23",
            ProductType::Sofa,
        )
        .scaled([1.3, 1.0, 1.0]),
        product(
            "h2",
            "Midnight Drum Table",
            "Tables",
            1150,
            "A chunky, sculptural coffee table in charcoal stained oak with three robust pillar legs.",
            [0.0, 0.0, 0.0],
            "#1A1A1A",
            ProductType::Table,
        )
        .scaled([1.1, 1.0, 1.1]),
        // Raised so the lamp base clears the drum table top
        product(
            "h3",
            "Teal Ceramic Lamp",
            "Lighting",
            420,
            "A hand-crafted ceramic table lamp with a vibrant teal finish and a linen drum shade.",
            [0.4, 1.0, 0.4],
            "#008080",
            ProductType::Lamp,
        )
        .scaled([1.2, 1.2, 1.2])
        .model("https://lamp-red.vercel.app/models/teal_ceramic_lamp.glb"),
        product(
            "h4",
            "Cloud Bouclé Lounge",
            "Seating",
            1450,
            "A plush armchair upholstered in premium white bouclé with a warm walnut wood frame.",
            [-2.8, 0.0, 1.8],
            "#F3F4F6",
            ProductType::Chair,
        ),
        product(
            "h6",
            "Mustard Velvet Rug",
            "Floor Decor",
            890,
            "A heavy-weight plush rug in deep mustard yellow that adds warmth and acoustic dampening.",
            [0.0, 0.01, 0.5],
            "#CA8A04",
            ProductType::Rug,
        ),
    ]
}

fn office_products() -> Vec<Product> {
    vec![
        product(
            "o1",
            "Executive Walnut Desk",
            "Desks",
            950,
            "A spacious walnut desk with built-in cable management.",
            [0.0, 0.0, -1.0],
            "#5D4037",
            ProductType::Desk,
        )
        .scaled([1.5, 1.0, 1.0]),
        product(
            "o2",
            "Ergo-Pro Chair",
            "Seating",
            520,
            "Fully adjustable ergonomic chair with lumbar support.",
            [0.0, 0.0, 1.0],
            "#374151",
            ProductType::Chair,
        ),
        product(
            "o3",
            "Task Light",
            "Lighting",
            120,
            "Dimmable LED task light with adjustable arm.",
            [1.2, 0.8, -1.0],
            "#1F2937",
            ProductType::Lamp,
        )
        .scaled([0.5, 0.5, 0.5]),
    ]
}

fn studio_products() -> Vec<Product> {
    vec![
        product(
            "s1",
            "Artist Easel",
            "Furniture",
            180,
            "Professional grade H-frame studio easel.",
            [0.0, 0.0, 0.0],
            "#A0522D",
            ProductType::Easel,
        ),
        product(
            "s2",
            "Drafting Stool",
            "Seating",
            140,
            "Height-adjustable swivel stool with footrest.",
            [1.5, 0.0, 0.0],
            "#262626",
            ProductType::Chair,
        ),
        product(
            "s3",
            "Gallery Shelf",
            "Storage",
            210,
            "Minimalist wall-mounted shelf for art supplies.",
            [-2.0, 1.5, -2.5],
            "#F9FAFB",
            ProductType::Shelf,
        )
        .scaled([2.0, 0.1, 0.4]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        let catalog = StaticCatalogRepository::seeded().unwrap();
        assert_eq!(catalog.products_for(SceneType::Home).len(), 6);
        assert_eq!(catalog.products_for(SceneType::Office).len(), 3);
        assert_eq!(catalog.products_for(SceneType::Studio).len(), 3);
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn test_ids_are_globally_unique() {
        let catalog = StaticCatalogRepository::seeded().unwrap();
        let mut ids = HashSet::new();
        for scene in [SceneType::Home, SceneType::Office, SceneType::Studio] {
            for product in catalog.products_for(scene) {
                assert!(ids.insert(product.id.clone()), "duplicate id {}", product.id);
            }
        }
    }

    #[test]
    fn test_home_order_is_stable() {
        let catalog = StaticCatalogRepository::seeded().unwrap();
        let ids: Vec<&str> = catalog
            .products_for(SceneType::Home)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["custom-1", "h1", "h2", "h3", "h4", "h6"]);
    }

    #[test]
    fn test_duplicate_across_scenes_is_rejected() {
        let a = product("dup", "A", "X", 1, "", [0.0; 3], "#000000", ProductType::Art);
        let b = product("dup", "B", "X", 2, "", [0.0; 3], "#000000", ProductType::Plant);
        let err = StaticCatalogRepository::from_table(vec![
            (SceneType::Home, vec![a]),
            (SceneType::Studio, vec![b]),
        ])
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_lookup_is_scoped_to_scene() {
        let catalog = StaticCatalogRepository::seeded().unwrap();
        assert!(catalog.find_in_scene(SceneType::Home, "h1").is_some());
        assert!(catalog.find_in_scene(SceneType::Office, "h1").is_none());
        let err = catalog.require_in_scene(SceneType::Studio, "o1").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_model_urls_and_defaults() {
        let catalog = StaticCatalogRepository::seeded().unwrap();
        let chair = catalog.find_in_scene(SceneType::Home, "custom-1").unwrap();
        assert!(chair.model_url.as_deref().unwrap().ends_with("SheenChair.glb"));
        assert_eq!(chair.effective_scale(), Vec3::splat(2.5));

        let rug = catalog.find_in_scene(SceneType::Home, "h6").unwrap();
        assert!(rug.model_url.is_none());
        assert_eq!(rug.effective_rotation(), Vec3::ZERO);
    }
}
