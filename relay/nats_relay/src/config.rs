use clap::{App, Arg, ArgMatches};
use config_rs::{Config, ConfigError, File};
use hub_relay_common::actors::nats_publisher::NatsClientConfig;
use hub_relay_common::HubRelayError;
use hub_relay_common_logger::LoggerConfig;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_DIR_DEFAULT: Option<&'static str> =
    option_env!("HUB_RELAY_NATS_RELAY_CONFIG_DIR_DEFAULT");

pub fn arg_matches() -> ArgMatches {
    App::new("hub_relay_nats_relay")
        .arg(Arg::new("config-dir")
            .long("config-dir")
            .help("The filesystem folder where the NATS relay configuration is saved")
            .default_value(CONFIG_DIR_DEFAULT.unwrap_or("/etc/hub_relay_nats_relay")))
        .arg(Arg::new("routes-dir")
            .long("routes-dir")
            .help("The folder where the route configurations are saved in JSON format; this folder is relative to the `config-dir`")
            .default_value("/routes/"))
        .get_matches()
}

#[derive(Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    /// The logger configuration
    pub logger: LoggerConfig,
    pub nats_relay: NatsRelayConfig,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct NatsRelayConfig {
    pub message_queue_size: usize,

    pub nats_client: NatsClientConfig,
}

/// A relay route: messages received on the source subject are republished
/// on the target subject under a fixed outbound event name. Routes are
/// plain data so the relay can be retargeted without a code change.
#[derive(Deserialize, Serialize, Clone)]
pub struct RouteConfig {
    pub source_subject: String,
    pub target_subject: String,
    pub outbound_event: String,
}

pub fn build_config(config_dir: &str) -> Result<RelayConfig, ConfigError> {
    let config_file_path = format!("{}/{}", &config_dir, "nats_relay.toml");
    let mut s = Config::new();
    s.merge(File::with_name(&config_file_path))?;
    s.try_into()
}

pub fn read_routes_from_config(path: &str) -> Result<Vec<RouteConfig>, HubRelayError> {
    info!("Loading route configurations from path: [{}]", path);

    let paths = fs::read_dir(path).map_err(|e| HubRelayError::ConfigurationError {
        message: format!("Cannot access config path [{}]: {}", path, e),
    })?;
    let mut routes = vec![];

    for path in paths {
        let filename = path
            .map_err(|e| HubRelayError::ConfigurationError {
                message: format!("Cannot get the filename. Err: {}", e),
            })?
            .path();
        debug!("Loading route configuration from file: [{}]", filename.display());
        let route_body =
            fs::read_to_string(&filename).map_err(|e| HubRelayError::ConfigurationError {
                message: format!("Unable to open the file [{}]. Err: {}", filename.display(), e),
            })?;
        trace!("Route configuration body: \n{}", route_body);
        routes.push(serde_json::from_str::<RouteConfig>(&route_body).map_err(|e| {
            HubRelayError::ConfigurationError {
                message: format!(
                    "Cannot build route from json config: [{:?}] \n error: [{}]",
                    &route_body, e
                ),
            }
        })?)
    }

    info!("Loaded {} route(s) from [{}]", routes.len(), path);

    Ok(routes)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_read_configuration_from_file() {
        // Arrange
        let path = "./config/";

        // Act
        let config = build_config(path);

        // Assert
        assert!(config.is_ok())
    }

    #[test]
    fn should_read_all_route_configurations_from_file() {
        // Arrange
        let path = "./config/routes";

        // Act
        let routes_config = read_routes_from_config(path).unwrap();

        // Assert
        assert_eq!(1, routes_config.len());
        assert_eq!("slv_hub", &routes_config[0].source_subject);
        assert_eq!("output_hub", &routes_config[0].target_subject);
        assert_eq!("ReceiveRfid", &routes_config[0].outbound_event);
    }
}
