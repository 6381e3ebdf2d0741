//! Camera framing directives handed to the rendering boundary.
//!
//! The state machine only decides the target; easing between framings is up
//! to whoever renders.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::product::Product;

/// Viewpoint of the gallery overview.
pub const DEFAULT_EYE: Vec3 = Vec3::new(7.0, 5.0, 10.0);
/// Look-at point of the gallery overview.
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Offset from a product's position to the focus viewpoint.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(5.0, 3.0, 5.0);

/// Where the camera should end up after a selection or scene change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraDirective {
    /// Frame a single product.
    Focus {
        product_id: String,
        eye: Vec3,
        target: Vec3,
    },
    /// Return to the overview.
    Default { eye: Vec3, target: Vec3 },
}

impl CameraDirective {
    pub fn focus(product: &Product) -> Self {
        Self::Focus {
            product_id: product.id.clone(),
            eye: product.position + FOCUS_OFFSET,
            target: product.position,
        }
    }

    pub fn overview() -> Self {
        Self::Default {
            eye: DEFAULT_EYE,
            target: DEFAULT_TARGET,
        }
    }

    pub fn eye(&self) -> Vec3 {
        match self {
            Self::Focus { eye, .. } | Self::Default { eye, .. } => *eye,
        }
    }

    pub fn target(&self) -> Vec3 {
        match self {
            Self::Focus { target, .. } | Self::Default { target, .. } => *target,
        }
    }
}
