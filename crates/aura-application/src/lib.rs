//! Application layer for the Aura showroom.
//!
//! Coordinates the domain state machine with the insight agent and the model
//! loader, and projects state into what the panels show.

pub mod insight_service;
pub mod insight_tracker;
pub mod scene_presenter;
pub mod showroom_session;
pub mod views;

pub use insight_service::InsightService;
pub use insight_tracker::{InsightState, InsightTicket, InsightTracker};
pub use scene_presenter::{ProductProxy, ProxyVisual, SceneLayout, ScenePresenter};
pub use showroom_session::{Effect, ShowroomSession};
