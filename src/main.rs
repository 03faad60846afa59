//! Potentially Hazardous Asteroids - HTTP service
//!
//! Serves today's potentially hazardous asteroids from the NASA NeoWs feed
//! as a JSON array on `GET /asteroids`.

use clap::Parser;
use log::warn;
use tokio::net::TcpListener;

use hazardous_asteroids::cli::Cli;
use hazardous_asteroids::config::Config;
use hazardous_asteroids::data::{AsteroidsDataHandler, NeoWsFeed};
use hazardous_asteroids::server::{self, AsteroidsHttpHandler};

/// Sets up logging to stdout; `RUST_LOG` overrides the default level.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stdout)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    init_logging(config.debug);

    if !config.verify_upstream_tls {
        warn!("TLS certificate verification for the NeoWs feed is disabled");
    }

    let feed = NeoWsFeed::new(config.nasa_api_key.clone(), config.verify_upstream_tls)?;
    let handler = AsteroidsHttpHandler::new(AsteroidsDataHandler::new(feed), config.debug);

    let listener = TcpListener::bind(&config.listen_address).await?;
    server::serve(listener, server::router(handler)).await?;

    Ok(())
}
