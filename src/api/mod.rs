use log::info;
use std::net::{Ipv4Addr, SocketAddr};

pub mod health;

/// Serves the liveness endpoint until the listener fails.
pub async fn web_server_task(port: u16) -> anyhow::Result<()> {
    let app = health::router();

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
