use crate::actors::message::{OutboundMessage, RelayActorError};
use crate::HubRelayError;
use actix::prelude::*;
use async_nats::{Connection, Options};
use log::*;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::rc::Rc;
use tokio::time;

const WAIT_BETWEEN_RESTARTS_SEC: u64 = 10;

pub struct NatsPublisherActor {
    config: NatsPublisherConfig,
    nats_connection: Rc<Option<Connection>>,
    restarted: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NatsPublisherConfig {
    pub client: NatsClientConfig,
    pub subject: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum NatsClientAuth {
    None,
    Tls {
        certificate_path: String,
        private_key_path: String,
        path_to_root_certificate: Option<String>,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NatsClientConfig {
    pub addresses: Vec<String>,
    pub auth: Option<NatsClientAuth>,
}

impl NatsClientConfig {
    pub async fn new_client(&self) -> std::io::Result<Connection> {
        let addresses = self.addresses.join(",");

        let mut options = Options::new()
            .disconnect_callback(|| error!("NatsClientConfig - connection to NATS server was lost"))
            .reconnect_callback(|| {
                info!("NatsClientConfig - connection to NATS server was restored")
            })
            .max_reconnects(None);

        match self.get_auth() {
            NatsClientAuth::Tls {
                certificate_path,
                private_key_path,
                path_to_root_certificate,
            } => {
                info!("NatsClientConfig - Open Nats connection (with TLS) to [{}]", addresses);
                options =
                    options.client_cert(certificate_path, private_key_path).tls_required(true);

                if let Some(path_to_root_certificate) = path_to_root_certificate {
                    debug!("NatsClientConfig - Trusting CA: {}", path_to_root_certificate);
                    options = options.add_root_certificate(path_to_root_certificate)
                }
            }
            NatsClientAuth::None => {
                info!("NatsClientConfig - Open Nats connection (without TLS) to [{}]", addresses);
            }
        };
        options.connect(&addresses).await
    }

    fn get_auth(&self) -> &NatsClientAuth {
        match &self.auth {
            None => &NatsClientAuth::None,
            Some(auth) => auth,
        }
    }
}

impl NatsPublisherActor {
    pub async fn start_new(
        config: NatsPublisherConfig,
        message_mailbox_capacity: usize,
    ) -> Result<Addr<NatsPublisherActor>, HubRelayError> {
        Ok(actix::Supervisor::start(move |ctx: &mut Context<NatsPublisherActor>| {
            ctx.set_mailbox_capacity(message_mailbox_capacity);
            NatsPublisherActor { config, nats_connection: Rc::new(None), restarted: false }
        }))
    }
}

impl Actor for NatsPublisherActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "NatsPublisherActor started. Connecting to NATS address(es): {:?}",
            self.config.client.addresses
        );

        let client_config = self.config.client.clone();
        let restarted = self.restarted;
        ctx.wait(
            async move {
                if restarted {
                    info!(
                        "NatsPublisherActor was restarted after a failure. Waiting {} seconds before proceeding ...",
                        WAIT_BETWEEN_RESTARTS_SEC
                    );
                    time::sleep(time::Duration::from_secs(WAIT_BETWEEN_RESTARTS_SEC)).await;
                }
                client_config.new_client().await
            }
            .into_actor(self)
            .map(move |client, act, ctx| match client {
                Ok(client) => {
                    info!(
                        "NatsPublisherActor connected to server [{:?}]",
                        &act.config.client.addresses
                    );
                    act.nats_connection = Rc::new(Some(client));
                }
                Err(err) => {
                    act.nats_connection = Rc::new(None);
                    warn!("NatsPublisherActor connection failed. Err: {}", err);
                    ctx.stop();
                }
            }),
        );
    }
}

impl actix::Supervised for NatsPublisherActor {
    fn restarting(&mut self, _ctx: &mut Context<NatsPublisherActor>) {
        info!("Restarting NatsPublisherActor");
        self.restarted = true;
    }
}

impl Handler<OutboundMessage> for NatsPublisherActor {
    type Result = Result<(), RelayActorError>;

    fn handle(&mut self, msg: OutboundMessage, ctx: &mut Context<Self>) -> Self::Result {
        trace!("NatsPublisherActor - Handling event to be published to Nats - {:?}", &msg.event);

        let address = ctx.address();

        if let Some(connection) = self.nats_connection.deref() {
            let event = serde_json::to_vec(&msg.event)
                .map_err(|err| RelayActorError::SerdeError { message: format! {"{}", err} })?;

            let client = connection.clone();
            let config = self.config.clone();

            actix::spawn(async move {
                debug!("NatsPublisherActor - Publishing event to NATS subject [{}]", config.subject);
                match client.publish(&config.subject, &event).await {
                    Ok(_) => trace!(
                        "NatsPublisherActor - Publish event to NATS succeeded. Event: {:?}",
                        &msg
                    ),
                    Err(e) => {
                        error!("NatsPublisherActor - Error sending event to NATS. Err: {:?}", e);
                        time::sleep(time::Duration::from_secs(1)).await;
                        address.try_send(msg).unwrap_or_else(|err| error!("NatsPublisherActor - Error while sending event to itself. Error: {}", err));
                    }
                }
            });
        } else {
            warn!("NatsPublisherActor - Processing event but NATS connection not yet established. Stopping actor and reprocessing the event ...");
            ctx.stop();
            address.try_send(msg).unwrap_or_else(|err| {
                error!("NatsPublisherActor - Error while sending event to itself. Err: {:?}", err)
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_deserialize_a_client_config_without_auth() {
        let json = r#"{"addresses": ["127.0.0.1:4222"]}"#;

        let config: NatsClientConfig = serde_json::from_str(json).unwrap();

        assert_eq!(vec!["127.0.0.1:4222".to_owned()], config.addresses);
        assert!(config.auth.is_none());
        assert!(matches!(config.get_auth(), NatsClientAuth::None));
    }

    #[test]
    fn should_deserialize_a_client_config_with_tls_auth() {
        let json = r#"{
            "addresses": ["nats.example.com:4222"],
            "auth": {
                "type": "Tls",
                "certificate_path": "/certs/client.pem",
                "private_key_path": "/certs/client.key",
                "path_to_root_certificate": "/certs/ca.pem"
            }
        }"#;

        let config: NatsClientConfig = serde_json::from_str(json).unwrap();

        match config.get_auth() {
            NatsClientAuth::Tls { certificate_path, path_to_root_certificate, .. } => {
                assert_eq!("/certs/client.pem", certificate_path);
                assert_eq!(Some("/certs/ca.pem".to_owned()), path_to_root_certificate.clone());
            }
            auth => panic!("expected Tls auth, got {:?}", auth),
        }
    }
}
