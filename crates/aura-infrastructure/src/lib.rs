//! Infrastructure layer: seed data, secret resolution and model fetching.

pub mod model_loader;
pub mod paths;
pub mod secret_service;
pub mod static_catalog_repository;

pub use crate::model_loader::HttpModelLoader;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::static_catalog_repository::StaticCatalogRepository;
