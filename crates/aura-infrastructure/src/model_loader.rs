//! Fetches and validates external glTF models.
//!
//! Only the container header is checked: binary glTF must carry the `glTF`
//! magic, version 2 and a declared length that fits the payload; JSON glTF
//! must declare `asset.version` 2.x. Mesh decoding belongs to the renderer.

use async_trait::async_trait;
use aura_core::model::{ModelAsset, ModelFormat, ModelLoader};
use aura_core::{AuraError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_LEN: usize = 12;
const SUPPORTED_VERSION: u32 = 2;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Loads models over HTTP(S), or from disk for relative/local paths.
///
/// Successful loads are cached by URL; failures are not, so a later scene
/// visit retries them.
pub struct HttpModelLoader {
    client: Client,
    asset_root: PathBuf,
    cache: Mutex<HashMap<String, ModelAsset>>,
}

impl HttpModelLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("[ModelLoader] Falling back to default HTTP client: {}", err);
                Client::new()
            });

        Self {
            client,
            asset_root: PathBuf::from("."),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Directory that non-URL model paths are resolved against.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if is_remote(url) {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| AuraError::model_load(url, format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(AuraError::model_load(url, format!("HTTP {status}")));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| AuraError::model_load(url, format!("failed to read body: {e}")))?;
            Ok(bytes.to_vec())
        } else {
            let path = self.asset_root.join(url.trim_start_matches("file://"));
            tokio::fs::read(&path)
                .await
                .map_err(|e| AuraError::model_load(url, format!("{}: {e}", path.display())))
        }
    }
}

impl Default for HttpModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelLoader for HttpModelLoader {
    async fn load(&self, url: &str) -> Result<ModelAsset> {
        if let Some(cached) = self.cache.lock().await.get(url) {
            return Ok(cached.clone());
        }

        tracing::debug!("[ModelLoader] Fetching {}", url);
        let bytes = self.fetch(url).await?;
        let asset = inspect_model(url, &bytes)?;

        tracing::info!(
            "[ModelLoader] Loaded {:?} model ({} bytes) from {}",
            asset.format,
            asset.byte_len,
            url
        );
        self.cache
            .lock()
            .await
            .insert(url.to_string(), asset.clone());
        Ok(asset)
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[derive(Deserialize)]
struct GltfDocument {
    asset: GltfAsset,
}

#[derive(Deserialize)]
struct GltfAsset {
    version: String,
}

/// Validates the container header of a downloaded model.
pub fn inspect_model(url: &str, bytes: &[u8]) -> Result<ModelAsset> {
    if bytes.starts_with(GLB_MAGIC) {
        return inspect_binary(url, bytes);
    }

    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'{') {
        return inspect_json(url, bytes);
    }

    Err(AuraError::model_load(url, "unrecognized model format"))
}

fn inspect_binary(url: &str, bytes: &[u8]) -> Result<ModelAsset> {
    if bytes.len() < GLB_HEADER_LEN {
        return Err(AuraError::model_load(url, "truncated GLB header"));
    }

    let version = read_u32_le(&bytes[4..8]);
    if version != SUPPORTED_VERSION {
        return Err(AuraError::model_load(
            url,
            format!("unsupported GLB version {version}"),
        ));
    }

    let declared = read_u32_le(&bytes[8..12]) as usize;
    if declared < GLB_HEADER_LEN || declared > bytes.len() {
        return Err(AuraError::model_load(
            url,
            format!("GLB declares {declared} bytes but {} were received", bytes.len()),
        ));
    }

    Ok(ModelAsset {
        url: url.to_string(),
        format: ModelFormat::Binary,
        version,
        byte_len: bytes.len(),
    })
}

fn inspect_json(url: &str, bytes: &[u8]) -> Result<ModelAsset> {
    let document: GltfDocument = serde_json::from_slice(bytes)
        .map_err(|e| AuraError::model_load(url, format!("invalid glTF JSON: {e}")))?;

    let major = document
        .asset
        .version
        .split('.')
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .ok_or_else(|| AuraError::model_load(url, "missing glTF asset version"))?;

    if major != SUPPORTED_VERSION {
        return Err(AuraError::model_load(
            url,
            format!("unsupported glTF version {}", document.asset.version),
        ));
    }

    Ok(ModelAsset {
        url: url.to_string(),
        format: ModelFormat::Json,
        version: major,
        byte_len: bytes.len(),
    })
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
