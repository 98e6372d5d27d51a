use crate::config::{NatsRelayConfig, RouteConfig};
use hub_relay_common::actors::message::{OutboundMessage, RelayActorError};
use hub_relay_common::actors::nats_publisher::{NatsPublisherActor, NatsPublisherConfig};
use hub_relay_common::actors::nats_subscriber::{subscribe_to_nats, NatsSubscriberConfig};
use hub_relay_common_api::InboundEvent;
use hub_relay_forwarder_common::{Forwarder, ForwarderError};
use hub_relay_forwarder_rfid::RfidForwarder;
use log::*;

pub mod config;

pub async fn start(
    relay_config: NatsRelayConfig,
    routes_config: Vec<RouteConfig>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let nats_config = relay_config.nats_client;

    for route in routes_config {
        info!(
            "Starting route [{}] -> [{}] with outbound event [{}]",
            route.source_subject, route.target_subject, route.outbound_event
        );

        let forwarder = RfidForwarder::new(&route.outbound_event).map_err(|err| {
            ForwarderError::ForwarderCreationError {
                message: format!(
                    "Cannot create forwarder for route [{}]. Err: {}",
                    route.source_subject, err
                ),
            }
        })?;

        let publisher_config = NatsPublisherConfig {
            client: nats_config.clone(),
            subject: route.target_subject.clone(),
        };
        let publisher =
            NatsPublisherActor::start_new(publisher_config, relay_config.message_queue_size)
                .await?;

        let subscriber_config = NatsSubscriberConfig {
            client: nats_config.clone(),
            subject: route.source_subject.clone(),
        };

        let source_subject = route.source_subject.clone();
        subscribe_to_nats(subscriber_config, relay_config.message_queue_size, move |data| {
            debug!("Subject [{}] called", source_subject);

            let event = serde_json::from_slice::<InboundEvent>(&data.msg).map_err(|err| {
                error!(
                    "Cannot decode the inbound event envelope on subject [{}]: {}",
                    source_subject, err
                );
                RelayActorError::GenericError {
                    message: format!("Cannot decode the inbound event envelope: {}", err),
                }
            })?;

            info!(
                "Received event [{}] on subject [{}] from connection [{}]",
                event.event_name, source_subject, event.connection_id
            );

            let outbound = forwarder
                .forward(&event)
                .map_err(|err| RelayActorError::GenericError { message: format!("{}", err) })?;

            for outbound_event in outbound {
                publisher.try_send(OutboundMessage { event: outbound_event }).map_err(|err| {
                    error!("Cannot enqueue the outbound event for publishing: {}", err);
                    RelayActorError::GenericError { message: format!("{}", err) }
                })?;
            }
            Ok(())
        })
        .await?;
    }

    Ok(())
}
