use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_server::{signal_or_pending, ServerConfig, TodoStore};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("could not register signal handlers, waiting for ctrl-c");
                signal_or_pending(tokio::signal::ctrl_c()).await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        signal_or_pending(tokio::signal::ctrl_c()).await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_json);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        cors = ?config.cors_origins,
        "listening"
    );

    let store = TodoStore::new();
    info!(todos = store.len().await, "store ready");
    let router = todo_server::router(store, &config);
    todo_server::serve(listener, router, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
