use hub_relay_common_api::{InboundEvent, OutboundEvent, RfidReading};
use hub_relay_forwarder_common::{Forwarder, ForwarderError};
use log::{error, info, warn};

/// The outcome of the diagnostic decode of an inbound payload.
/// The decode never alters the payload that would be forwarded; it only
/// determines whether the forward happens at all.
#[derive(Debug, PartialEq)]
pub enum DecodeOutcome {
    Decoded(RfidReading),
    DecodeError(String),
}

/// Decodes a raw payload into an RfidReading for logging purposes.
pub fn decode_reading(payload: &str) -> DecodeOutcome {
    match serde_json::from_str::<RfidReading>(payload) {
        Ok(reading) => DecodeOutcome::Decoded(reading),
        Err(err) => DecodeOutcome::DecodeError(format!("{}", err)),
    }
}

/// A Forwarder that relays RFID payloads verbatim under a fixed outbound
/// event name. The payload is decoded first and only for diagnostics: a
/// decode failure suppresses the forward and propagates, an empty payload
/// is a logged no-op.
pub struct RfidForwarder {
    event_name: String,
}

impl RfidForwarder {
    pub fn new<S: Into<String>>(event_name: S) -> Result<RfidForwarder, ForwarderError> {
        let event_name = event_name.into();
        if event_name.is_empty() {
            return Err(ForwarderError::ForwarderCreationError {
                message: "The outbound event name cannot be empty".to_owned(),
            });
        }
        Ok(RfidForwarder { event_name })
    }
}

impl Forwarder for RfidForwarder {
    fn forward(&self, event: &InboundEvent) -> Result<Vec<OutboundEvent>, ForwarderError> {
        info!(
            "RfidForwarder - received event [{}] from hub [{}], connection [{}]",
            event.event_name, event.hub_name, event.connection_id
        );

        if event.payload.is_empty() {
            warn!("RfidForwarder - empty payload received, nothing to forward");
            return Ok(vec![]);
        }

        // The decode runs before the forward: a payload that cannot be read
        // as an RfidReading is never forwarded, even though the forward
        // itself would not touch it.
        match decode_reading(&event.payload) {
            DecodeOutcome::Decoded(reading) => {
                info!(
                    "RfidForwarder - card_id: {:?}, device: {:?}",
                    reading.card_id, reading.device_name
                );
                Ok(vec![OutboundEvent::new(&self.event_name, event.payload.clone())])
            }
            DecodeOutcome::DecodeError(reason) => {
                error!("RfidForwarder - cannot decode payload as an RFID reading: {}", reason);
                Err(ForwarderError::DecodeFailure { message: reason })
            }
        }
    }
}
