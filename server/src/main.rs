use tokio::net::TcpListener;
use todo_server::{config::Config, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    if let Err(e) = telemetry::init(config.log_format) {
        warn!(error = %e, "tracing init failed");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, path = %config.graphql_path, mode = ?config.mode, "server ready");
    todo_server::run(listener, &config).await?;
    Ok(())
}
