use actix::System;
use hub_relay_common_logger::setup_logger;
use hub_relay_nats_relay::*;
use log::*;

#[actix_rt::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let arg_matches = config::arg_matches();

    let config_dir = arg_matches.value_of("config-dir").expect("config-dir should be provided");
    let routes_dir = arg_matches.value_of("routes-dir").expect("routes-dir should be provided");

    let relay_config = config::build_config(config_dir)?;

    let _guard = setup_logger(&relay_config.logger)?;

    info!("Starting NATS hub relay");

    let full_routes_dir = format!("{}/{}", &config_dir, &routes_dir);
    let routes_config = config::read_routes_from_config(&full_routes_dir)?;

    start(relay_config.nats_relay, routes_config).await?;

    tokio::signal::ctrl_c().await?;
    println!("Ctrl-C received, shutting down");
    System::current().stop();

    Ok(())
}
