//! Backend entry-point: wires REST endpoints, consensus policy, and OpenAPI docs.

mod server;

use std::env;
use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::{ConsensusPolicy, ConsensusSettings};
use backend::inbound::http::health::HealthState;
use server::ServerConfig;

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

    let settings = ConsensusSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let policy = ConsensusPolicy::try_from(settings)
        .map_err(|e| std::io::Error::other(format!("invalid consensus settings: {e}")))?;

    let bind_addr: SocketAddr = env::var("CONVENE_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let config = ServerConfig::new(bind_addr, policy);
    #[cfg(feature = "example-data")]
    let config = seed_directories(config)?;
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()));

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}

/// Fill the directories with the configured demo population, when enabled.
#[cfg(feature = "example-data")]
fn seed_directories(config: ServerConfig) -> std::io::Result<ServerConfig> {
    use backend::example_data::{ExampleDataSettings, demo_population_on_startup};

    let settings = ExampleDataSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load seeding settings: {e}")))?;
    let population = demo_population_on_startup(&settings)
        .map_err(|e| std::io::Error::other(format!("demo population seeding failed: {e}")))?;
    Ok(match population {
        Some(data) => config.with_seed(server::DirectorySeed::from(data)),
        None => config,
    })
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    PrometheusMetricsBuilder::new("convene")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
