#[macro_use]
extern crate tracing;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use actix_web::{App, HttpServer};
use anyhow::{anyhow, Context};
use rustls::{Certificate, PrivateKey, ServerConfig};
use rustls_pemfile::{certs, pkcs8_private_keys};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use budget_lib::auth::jwt::JWTAuth;
use budget_lib::config::{Config, SSLConfig};
use budget_lib::cors::create_cors;

const SERVICE_NAME: &str = "budget-server";

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config = match get_config_file() {
        Some(config_path) => {
            info!(?config_path, "Loading config file");
            Config::from_file(config_path)?
        }
        None => {
            info!("No config file found, reading config from environment");
            Config::from_env()?
        }
    };

    let telemetry_layer = config
        .telemetry
        .as_ref()
        .map(|telemetry| budget_lib::tracing::create_opentelemetry_layer(SERVICE_NAME, telemetry))
        .transpose()?;

    let subscriber = registry::Registry::default()
        .with(config.log.level_filter()?)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global tracing subscriber")?;
    drop(tracing_guard);

    let repos = budget_repo::sqlx_repo::create_repos(
        &config.database_url,
        config.max_pool_size,
        config.run_migrations,
    )
    .await?;

    let jwt_auth = JWTAuth::from_config(&config.auth)?;
    let cors_config = config.cors.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(&cors_config))
            .wrap(budget_lib::tracing::create_middleware())
            .configure(budget_lib::app_config_func(
                jwt_auth.clone(),
                repos.clone(),
            ))
    });

    let address = ("0.0.0.0", config.port);
    let server = match config.ssl {
        None => {
            warn!(port = config.port, "Using http");
            server.bind(address)?
        }
        Some(ssl_config) => {
            info!(port = config.port, "Using https");
            server.bind_rustls(address, load_tls_config(ssl_config)?)?
        }
    };
    server.run().await?;

    Ok(())
}

fn load_tls_config(ssl_config: SSLConfig) -> Result<ServerConfig, anyhow::Error> {
    let config = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth();

    let mut cert_file = BufReader::new(
        File::open(ssl_config.certificate_chain_file)
            .context("Error opening certificate chain file")?,
    );
    let mut key_file = BufReader::new(
        File::open(ssl_config.private_key_file).context("Error opening private key file")?,
    );

    let cert_chain = certs(&mut cert_file)
        .context("Unable to read certificate chain file")?
        .into_iter()
        .map(Certificate)
        .collect();
    let mut keys: Vec<PrivateKey> = pkcs8_private_keys(&mut key_file)
        .context("Unable to read private key file")?
        .into_iter()
        .map(PrivateKey)
        .collect();

    if keys.is_empty() {
        return Err(anyhow!("No private key found in file"));
    }

    config
        .with_single_cert(cert_chain, keys.remove(0))
        .context("Invalid certificate or private key")
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
