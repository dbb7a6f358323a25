use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::serve;
use tokio::net::TcpListener;
use toml::Value;
use util::workspace_dir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let secrets = util::load_env()?;
    let api_key = secrets
        .get("GEMINI_API_KEY")
        .and_then(Value::as_str)
        .context("GEMINI_API_KEY is missing from Secrets.toml")?;

    let config_name = secrets
        .get("CONFIG")
        .and_then(Value::as_str)
        .unwrap_or("Config.toml");

    let data_dir = workspace_dir().join("data");
    std::fs::create_dir_all(&data_dir)
        .context("failed to create the data directory")?;

    let router = serve(api_key, config_name, &data_dir).await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000));
    let listener = TcpListener::bind(&address).await?;
    Ok(axum::serve(listener, router).await?)
}
