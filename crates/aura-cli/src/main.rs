use std::sync::Arc;

use anyhow::Result;
use aura_application::{InsightService, ScenePresenter, ShowroomSession};
use aura_core::SceneType;
use aura_core::config::InsightConfig;
use aura_infrastructure::{HttpModelLoader, StaticCatalogRepository};
use aura_interaction::{Agent, DisabledAgent, GeminiApiAgent};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod helper;
mod render;

use app::App;

#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(about = "Aura Home showroom - browse rooms, inspect pieces, fill a cart", long_about = None)]
struct Args {
    /// Room to open with (home, office, studio)
    #[arg(long, default_value = "home", value_parser = parse_scene)]
    scene: SceneType,

    /// Skip model downloads and draw every piece procedurally
    #[arg(long)]
    offline: bool,

    /// Log filter, used when RUST_LOG is not set
    #[arg(long, default_value = "warn,aura=info")]
    log_level: String,
}

fn parse_scene(value: &str) -> Result<SceneType, String> {
    value
        .parse::<SceneType>()
        .map_err(|_| format!("unknown scene '{value}', expected home, office or studio"))
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Gemini when a key is configured, otherwise an agent that always fails so
/// every insight shows the fallback sentence.
async fn build_agent() -> Arc<dyn Agent> {
    match GeminiApiAgent::try_from_env().await {
        Ok(agent) => {
            tracing::info!("[Aura] Insights via Gemini model {}", agent.model());
            Arc::new(agent)
        }
        Err(err) => {
            tracing::warn!("[Aura] Insights disabled: {}", err);
            Arc::new(DisabledAgent::new(err.to_string()))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let catalog = Arc::new(StaticCatalogRepository::seeded()?);
    tracing::info!("[Aura] Catalog loaded with {} products", catalog.len());

    let agent = build_agent().await;
    let insight = Arc::new(InsightService::new(agent, InsightConfig::default()));

    let presenter = if args.offline {
        tracing::info!("[Aura] Offline mode, external models are skipped");
        ScenePresenter::offline()
    } else {
        ScenePresenter::new(Arc::new(HttpModelLoader::new()))
    };

    let session = ShowroomSession::new(catalog, args.scene);
    let (events_tx, events_rx) = mpsc::channel(64);

    App::new(session, insight, presenter, events_tx)
        .run(events_rx)
        .await
}
