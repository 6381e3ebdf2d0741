//! Catalog product records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::geometry::Vec3;

/// Closed set of furniture kinds.
///
/// Every consumer (procedural shapes, hover marker, icons) matches on this
/// exhaustively, so a new kind is a compile-checked extension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductType {
    Chair,
    Table,
    Lamp,
    Plant,
    Rug,
    Shelf,
    Sofa,
    Easel,
    Desk,
    Art,
}

/// An immutable catalog record.
///
/// Products are shared as `Arc<Product>` handed out by the catalog; nothing
/// downstream mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Globally unique across all scenes.
    pub id: String,
    pub name: String,
    pub category: String,
    /// Whole currency units.
    pub price: u64,
    pub description: String,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    /// Display color as `#RRGGBB`.
    pub color: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Path or URL of a `.glb`/`.gltf` file. `None` means procedural shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
}

impl Product {
    /// Scale with the unit default applied.
    pub fn effective_scale(&self) -> Vec3 {
        self.scale.unwrap_or(Vec3::ONE)
    }

    /// Rotation (Euler, radians) with the zero default applied.
    pub fn effective_rotation(&self) -> Vec3 {
        self.rotation.unwrap_or(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: "t1".to_string(),
            name: "Test Table".to_string(),
            category: "Tables".to_string(),
            price: 100,
            description: "A table.".to_string(),
            position: Vec3::new(1.0, 0.0, 2.0),
            scale: None,
            rotation: None,
            color: "#000000".to_string(),
            product_type: ProductType::Table,
            model_url: None,
        }
    }

    #[test]
    fn test_effective_defaults() {
        let product = sample();
        assert_eq!(product.effective_scale(), Vec3::ONE);
        assert_eq!(product.effective_rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "table");
        assert_eq!(json["position"], serde_json::json!([1.0, 0.0, 2.0]));
        assert!(json.get("modelUrl").is_none());
    }

    #[test]
    fn test_type_round_trips_through_strings() {
        use std::str::FromStr;
        assert_eq!(ProductType::from_str("easel").unwrap(), ProductType::Easel);
        assert_eq!(ProductType::Sofa.to_string(), "sofa");
    }
}
