mod config;
mod error;
mod routes;
mod server;
mod telemetry;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    telemetry::init();

    let config = Config::parse();
    server::run(config).await
}
