//! Scene Presenter
//!
//! Turns a scene's product list into interactive proxies for the renderer.
//! Each proxy is either an external model that loaded and validated, or a
//! procedural shape chosen by product type. The interaction surface (click,
//! hover, transform) is identical in both cases.
//!
//! A layout is available as soon as the scene opens. Models resolve one
//! product at a time and are applied to their own proxy when they arrive.

use aura_core::model::{ModelAsset, ModelLoader};
use aura_core::{Product, ProductType, SceneType, Vec3};
use serde::Serialize;
use std::f32::consts::PI;
use std::sync::Arc;

/// Marker color shown above a hovered proxy.
pub const HOVER_MARKER_COLOR: &str = "#EAB308";

/// Geometric building block of a procedural shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveKind {
    RoundedBox { radius: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32 },
    Sphere { radius: f32 },
    Capsule { radius: f32 },
    /// Swept tube along a frame path fitted into `size`.
    Tube { radius: f32 },
    /// Profile rotated around the Y axis.
    Lathe,
    Plane,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Bounding extent.
    pub size: Vec3,
    /// Center relative to the proxy origin.
    pub offset: Vec3,
    pub color: String,
}

impl Primitive {
    fn new(kind: PrimitiveKind, size: [f32; 3], offset: [f32; 3], color: &str) -> Self {
        Self {
            kind,
            size: size.into(),
            offset: offset.into(),
            color: color.to_string(),
        }
    }
}

/// Built-in representation of a product type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProceduralShape {
    /// Extra rotation about Y applied on top of the product's own rotation.
    pub yaw: f32,
    pub primitives: Vec<Primitive>,
}

/// How a proxy is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ProxyVisual {
    External { asset: ModelAsset },
    Procedural { shape: ProceduralShape },
}

/// Interactive stand-in for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProxy {
    pub product: Arc<Product>,
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
    pub visual: ProxyVisual,
    /// Height above the origin where the hover marker appears, before scaling.
    pub marker_height: f32,
    /// An external model is still loading; the procedural shape stands in.
    pub model_pending: bool,
}

impl ProductProxy {
    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn uses_external_model(&self) -> bool {
        matches!(self.visual, ProxyVisual::External { .. })
    }
}

/// Events a proxy reports upward.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyEvent {
    /// Carries the full product; feeds `select_product`.
    Click(Arc<Product>),
    HoverEnter(HoverMarker),
    HoverExit { product_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverMarker {
    pub product_id: String,
    pub position: Vec3,
    pub color: &'static str,
}

/// The proxies of one scene, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    pub scene: SceneType,
    pub proxies: Vec<ProductProxy>,
    #[serde(skip)]
    hovered: Option<String>,
}

impl SceneLayout {
    pub fn proxy(&self, id: &str) -> Option<&ProductProxy> {
        self.proxies.iter().find(|proxy| proxy.id() == id)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Click on a proxy. Unknown ids produce nothing.
    pub fn click(&self, id: &str) -> Option<ProxyEvent> {
        self.proxy(id)
            .map(|proxy| ProxyEvent::Click(proxy.product.clone()))
    }

    /// Pointer enters a proxy. Leaving the previously hovered proxy is implied.
    ///
    /// Hover is visual feedback only and never touches session state.
    pub fn hover_enter(&mut self, id: &str) -> Vec<ProxyEvent> {
        let Some(proxy) = self.proxy(id) else {
            return Vec::new();
        };
        let marker = HoverMarker {
            product_id: proxy.id().to_string(),
            position: proxy.position + Vec3::new(0.0, proxy.marker_height * proxy.scale.y, 0.0),
            color: HOVER_MARKER_COLOR,
        };

        let mut events = Vec::new();
        if let Some(previous) = self.hovered.take() {
            if previous == id {
                self.hovered = Some(previous);
                return events;
            }
            events.push(ProxyEvent::HoverExit {
                product_id: previous,
            });
        }
        self.hovered = Some(id.to_string());
        events.push(ProxyEvent::HoverEnter(marker));
        events
    }

    /// Products whose model is still loading.
    pub fn pending_models(&self) -> Vec<Arc<Product>> {
        self.proxies
            .iter()
            .filter(|proxy| proxy.model_pending)
            .map(|proxy| proxy.product.clone())
            .collect()
    }

    /// Swaps in the resolved visual for one proxy. Siblings are untouched.
    ///
    /// Returns `false` when the proxy is unknown or no longer waiting.
    pub fn apply_model(&mut self, product_id: &str, visual: ProxyVisual) -> bool {
        match self
            .proxies
            .iter_mut()
            .find(|proxy| proxy.id() == product_id && proxy.model_pending)
        {
            Some(proxy) => {
                proxy.visual = visual;
                proxy.model_pending = false;
                true
            }
            None => false,
        }
    }

    /// Pointer leaves whatever it was over.
    pub fn hover_exit(&mut self) -> Option<ProxyEvent> {
        self.hovered
            .take()
            .map(|product_id| ProxyEvent::HoverExit { product_id })
    }
}

/// Builds scene layouts and resolves their external models.
#[derive(Clone, Default)]
pub struct ScenePresenter {
    loader: Option<Arc<dyn ModelLoader>>,
}

impl ScenePresenter {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader: Some(loader),
        }
    }

    /// Presenter that never fetches; every proxy is procedural.
    pub fn offline() -> Self {
        Self { loader: None }
    }

    /// Lays out `products` for `scene` without waiting on any model.
    ///
    /// Every proxy starts procedural. Proxies whose product names a model are
    /// marked pending until [`SceneLayout::apply_model`] swaps the result in.
    pub fn layout(&self, scene: SceneType, products: &[Arc<Product>]) -> SceneLayout {
        let proxies: Vec<ProductProxy> = products
            .iter()
            .map(|product| ProductProxy {
                position: product.position,
                scale: product.effective_scale(),
                rotation: product.effective_rotation(),
                marker_height: marker_height(product.product_type),
                visual: ProxyVisual::Procedural {
                    shape: procedural_shape(product),
                },
                model_pending: self.loader.is_some() && product.model_url.is_some(),
                product: product.clone(),
            })
            .collect();

        tracing::info!(
            "[ScenePresenter] {} laid out: {} proxies ({} models pending)",
            scene,
            proxies.len(),
            proxies.iter().filter(|p| p.model_pending).count()
        );

        SceneLayout {
            scene,
            proxies,
            hovered: None,
        }
    }

    /// Loads the model for one product.
    ///
    /// Returns `None` when there is nothing to load. A failing or panicking
    /// load yields the procedural shape, so the caller always gets a final
    /// visual for the proxy.
    pub async fn resolve_model(&self, product: Arc<Product>) -> Option<ProxyVisual> {
        let loader = self.loader.clone()?;
        let url = product.model_url.clone()?;

        let task = tokio::spawn(async move { loader.load(&url).await });

        let visual = match task.await {
            Ok(Ok(asset)) => {
                tracing::info!("[ScenePresenter] Model ready for '{}'", product.id);
                ProxyVisual::External { asset }
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    "[ScenePresenter] Using procedural shape for '{}': {}",
                    product.id,
                    err
                );
                ProxyVisual::Procedural {
                    shape: procedural_shape(&product),
                }
            }
            Err(join_err) => {
                tracing::warn!(
                    "[ScenePresenter] Model task for '{}' aborted: {}",
                    product.id,
                    join_err
                );
                ProxyVisual::Procedural {
                    shape: procedural_shape(&product),
                }
            }
        };
        Some(visual)
    }
}

/// Height of the hover marker above a proxy's origin.
pub fn marker_height(product_type: ProductType) -> f32 {
    match product_type {
        ProductType::Lamp => 1.8,
        ProductType::Chair
        | ProductType::Table
        | ProductType::Plant
        | ProductType::Rug
        | ProductType::Shelf
        | ProductType::Sofa
        | ProductType::Easel
        | ProductType::Desk
        | ProductType::Art => 2.5,
    }
}

/// Built-in shape for a product, keyed by its type.
pub fn procedural_shape(product: &Product) -> ProceduralShape {
    let color = product.color.as_str();

    match product.product_type {
        ProductType::Sofa => {
            let mut primitives = vec![Primitive::new(
                PrimitiveKind::RoundedBox { radius: 0.12 },
                [4.5, 0.6, 1.8],
                [0.0, 0.3, 0.0],
                color,
            )];
            for x in [-1.6, -0.55, 0.55, 1.6] {
                primitives.push(Primitive::new(
                    PrimitiveKind::RoundedBox { radius: 0.18 },
                    [1.05, 0.95, 0.45],
                    [x, 1.0, -0.6],
                    color,
                ));
                primitives.push(Primitive::new(
                    PrimitiveKind::Capsule { radius: 0.015 },
                    [0.03, 0.8, 0.03],
                    [x, 1.0, -0.37],
                    "#444444",
                ));
            }
            ProceduralShape { yaw: 0.0, primitives }
        }
        ProductType::Table => {
            let mut primitives = vec![Primitive::new(
                PrimitiveKind::Cylinder {
                    radius_top: 1.2,
                    radius_bottom: 1.2,
                },
                [2.4, 0.22, 2.4],
                [0.0, 0.45, 0.0],
                color,
            )];
            for [x, z] in [[0.7, 0.4], [-0.7, 0.4], [0.0, -0.8]] {
                primitives.push(Primitive::new(
                    PrimitiveKind::Cylinder {
                        radius_top: 0.24,
                        radius_bottom: 0.24,
                    },
                    [0.48, 0.4, 0.48],
                    [x, 0.2, z],
                    color,
                ));
            }
            ProceduralShape { yaw: 0.0, primitives }
        }
        ProductType::Chair => {
            let is_boucle = product.id == "h4";
            ProceduralShape {
                yaw: if is_boucle { PI / 4.0 } else { -PI / 3.5 },
                primitives: vec![
                    Primitive::new(
                        PrimitiveKind::Tube { radius: 0.04 },
                        [0.9, 0.6, 0.8],
                        [0.0, 0.3, 0.0],
                        "#3D2B1F",
                    ),
                    Primitive::new(
                        PrimitiveKind::RoundedBox { radius: 0.2 },
                        [0.85, 0.45, 0.85],
                        [0.0, 0.4, 0.0],
                        color,
                    ),
                    Primitive::new(
                        PrimitiveKind::RoundedBox { radius: 0.25 },
                        [0.85, 0.85, 0.25],
                        [0.0, 0.85, -0.35],
                        color,
                    ),
                ],
            }
        }
        ProductType::Lamp if product.id == "h3" => ProceduralShape {
            yaw: 0.0,
            primitives: vec![
                Primitive::new(PrimitiveKind::Lathe, [0.56, 0.8, 0.56], [0.0, 0.4, 0.0], "#789B8D"),
                Primitive::new(
                    PrimitiveKind::Cylinder {
                        radius_top: 0.32,
                        radius_bottom: 0.42,
                    },
                    [0.84, 0.95, 0.84],
                    [0.0, 0.8, 0.0],
                    "#B9D1C3",
                ),
            ],
        },
        ProductType::Lamp => ProceduralShape {
            yaw: 0.0,
            primitives: vec![
                Primitive::new(
                    PrimitiveKind::Cylinder {
                        radius_top: 0.004,
                        radius_bottom: 0.004,
                    },
                    [0.008, 5.0, 0.008],
                    [0.0, 2.0, 0.0],
                    "#111111",
                ),
                Primitive::new(
                    PrimitiveKind::Sphere { radius: 0.08 },
                    [0.16, 0.16, 0.16],
                    [0.0, -0.4, 0.0],
                    "#FFFFFF",
                ),
            ],
        },
        ProductType::Rug => ProceduralShape {
            yaw: 0.0,
            primitives: vec![Primitive::new(
                PrimitiveKind::Plane,
                [8.5, 0.0, 6.5],
                [0.0, 0.015, 0.0],
                color,
            )],
        },
        ProductType::Plant
        | ProductType::Shelf
        | ProductType::Easel
        | ProductType::Desk
        | ProductType::Art => ProceduralShape {
            yaw: 0.0,
            primitives: vec![Primitive::new(
                PrimitiveKind::RoundedBox { radius: 0.1 },
                [1.0, 1.0, 1.0],
                [0.0, 0.0, 0.0],
                color,
            )],
        },
    }
}
