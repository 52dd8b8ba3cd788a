use serverify_server::Config;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = Config::from_env().addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    serverify_server::run(listener).await
}
