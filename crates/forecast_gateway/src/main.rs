use axum::serve;
use forecast_gateway::{app, build_app_state, get_config_info, get_log_level, setup_logger};
use log::{error, info};
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info()?;
    setup_logger().level(get_log_level(&cli)).apply()?;
    let socket_addr = SocketAddr::from_str(&format!(
        "{}:{}",
        cli.domain.clone().unwrap_or(String::from("0.0.0.0")),
        cli.port.clone().unwrap_or(String::from("8080"))
    ))?;

    let app_state = build_app_state(&cli)?;
    let listener = TcpListener::bind(socket_addr).await?;

    info!("listening on http://{}", socket_addr);

    serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shutdown completed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
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
    info!("received shutdown signal, draining open requests");
}
