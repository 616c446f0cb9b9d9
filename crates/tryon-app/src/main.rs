mod backend;
mod error;

use tracing_subscriber::EnvFilter;
use crate::backend::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let conf = AppConfig::load()?;
    backend::serve(conf).await
}
