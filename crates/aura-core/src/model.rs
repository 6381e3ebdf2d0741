//! External 3D model loading contract.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// Container format of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Binary glTF (`.glb`).
    Binary,
    /// JSON glTF (`.gltf`).
    Json,
}

/// A model that was fetched and passed header validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAsset {
    pub url: String,
    pub format: ModelFormat,
    /// glTF container version (`2` for every asset accepted today).
    pub version: u32,
    pub byte_len: usize,
}

/// Loads an external model referenced by a product.
///
/// Failures are returned, never panicked; the scene presenter turns them into
/// a procedural fallback for that product alone.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<ModelAsset>;
}
