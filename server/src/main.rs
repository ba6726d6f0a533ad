use anyhow::Context;
use roster_server::{AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roster_server::telemetry::init_tracing();
    let config = Config::from_env().context("invalid configuration")?;

    let state = AppState::load(&config).inspect_err(|err| {
        tracing::error!(%err, "failed to load record data; shutting down");
    })?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");
    roster_server::run(listener, state).await?;
    Ok(())
}
