//! Backend entry-point: loads settings, seeds the demo marketplace when asked
//! and serves the REST API with its OpenAPI docs.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use skillswap::example_data::seed_example_data_on_startup;
use skillswap::inbound::http::health::HealthState;
use skillswap::inbound::http::state::HttpState;
use skillswap::server::{InMemoryMarketplace, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let key = settings.session_key()?;
    let bind_addr = settings.bind_addr()?;

    let marketplace = InMemoryMarketplace::new(Arc::new(DefaultClock));
    seed_example_data_on_startup(&settings, &marketplace)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        HttpState::new(marketplace.ports()),
        key,
        settings.cookie_secure,
        bind_addr,
    )?;
    server.await
}
