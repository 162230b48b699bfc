//! chaos gateway
//!
//! - Config: `CONFIG_PATH` (default `blue.yaml`) merged over built-in defaults
//! - Metrics: LaunchDarkly `http-errors` events when an SDK key is present
//! - HTTP: `GET /health` + catch-all with injected latency and failures

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chaos_core::error::{ChaosError, Result};
use chaos_gateway::{app_state::AppState, config, reporter::Reporter, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "chaos-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let env = config::RuntimeEnv::from_process()?;
    let cfg = config::load_from_file(&env.config_path)?;
    let reporter = Reporter::from_env(&env, &cfg.name)?;

    tracing::info!(
        service = %cfg.name,
        version = %cfg.version,
        failure_rate = cfg.failure_rate,
        min_ms = cfg.latency.min_ms,
        max_ms = cfg.latency.max_ms,
        "configuration loaded"
    );

    let app = router::build_router(AppState::new(cfg, reporter));

    let listen = SocketAddr::from(([0, 0, 0, 0], env.port));
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ChaosError::Io(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "chaos-gateway starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ChaosError::Io(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
