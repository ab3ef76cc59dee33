use magi::{AspectEngine, Ephemerides, PositionResolver};
use magi_server::{build_router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = magi_config::load_settings()?;
    log::info!(
        "Ephemeris path {} ({} frame)",
        settings.ephemeris.path.display(),
        settings.ephemeris.frame
    );

    // One-time backend setup; failures degrade bodies rather than abort.
    let ephemerides = Arc::new(Ephemerides::init(&settings.ephemeris));

    let state = AppState {
        resolver: PositionResolver::new(ephemerides),
        engine: AspectEngine::new(settings.orbs.clone()),
        charts: settings.charts.clone(),
        request_timeout: settings.server.request_timeout,
    };

    let listener = tokio::net::TcpListener::bind(settings.server.bind).await?;
    log::info!("Magi service listening on {}", settings.server.bind);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
