//! Domain layer for the Aura showroom.
//!
//! Holds the catalog records, the session state machine, and the traits the
//! outer layers implement (catalog storage, model loading, secrets).

pub mod camera;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod product;
pub mod scene;
pub mod secret;
pub mod state;

// Re-export common error type
pub use error::{AuraError, Result};

pub use camera::CameraDirective;
pub use cart::CartItem;
pub use geometry::Vec3;
pub use product::{Product, ProductType};
pub use scene::SceneType;
pub use state::ShowroomState;
