use serde::{Deserialize, Serialize};

/// An InboundEvent is a message delivered by the backplane on a source hub.
/// It carries the publishing session metadata and the raw payload string;
/// the payload is assumed to be JSON but is never required to be.
/// Events are ephemeral: they live for the duration of one forward and are
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundEvent {
    pub hub_name: String,
    pub category: String,
    pub event_name: String,
    pub connection_id: String,
    /// An absent payload deserializes to the empty string; both take the
    /// same no-op path in the forwarder.
    #[serde(default)]
    pub payload: String,
}

impl InboundEvent {
    /// Builds an event in the `messages` category, the only category the
    /// backplane delivers to the relay.
    pub fn new<H: Into<String>, E: Into<String>, C: Into<String>, P: Into<String>>(
        hub_name: H,
        event_name: E,
        connection_id: C,
        payload: P,
    ) -> InboundEvent {
        InboundEvent {
            hub_name: hub_name.into(),
            category: "messages".to_owned(),
            event_name: event_name.into(),
            connection_id: connection_id.into(),
            payload: payload.into(),
        }
    }
}

/// The decoded view of an RFID payload. Every field is optional: absence is
/// a valid, first-class state, not an error. The reading is used only for
/// logging; it never gates or alters the forward decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RfidReading {
    #[serde(rename = "carteSlv")]
    pub card_id: Option<String>,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
    #[serde(rename = "deviceName")]
    pub device_name: Option<String>,
    #[serde(rename = "tsUtc")]
    pub timestamp_utc: Option<String>,
}

/// An OutboundEvent is what the relay republishes on the target hub: a fixed
/// event name and exactly one argument holding the original raw payload,
/// byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundEvent {
    pub event_name: String,
    pub arguments: Vec<String>,
}

impl OutboundEvent {
    pub fn new<S: Into<String>>(event_name: S, payload: String) -> OutboundEvent {
        OutboundEvent { event_name: event_name.into(), arguments: vec![payload] }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_deserialize_an_inbound_event() {
        let json = r#"{
            "hub_name": "slv_hub",
            "category": "messages",
            "event_name": "ReceiveRfid",
            "connection_id": "conn-123",
            "payload": "{\"carteSlv\":\"A1\"}"
        }"#;

        let event: InboundEvent = serde_json::from_str(json).unwrap();

        assert_eq!("slv_hub", &event.hub_name);
        assert_eq!("ReceiveRfid", &event.event_name);
        assert_eq!(r#"{"carteSlv":"A1"}"#, &event.payload);
    }

    #[test]
    fn absent_payload_should_default_to_the_empty_string() {
        let json = r#"{
            "hub_name": "slv_hub",
            "category": "messages",
            "event_name": "ReceiveRfid",
            "connection_id": "conn-123"
        }"#;

        let event: InboundEvent = serde_json::from_str(json).unwrap();

        assert_eq!("", &event.payload);
    }

    #[test]
    fn reading_fields_should_all_be_optional() {
        let reading: RfidReading = serde_json::from_str("{}").unwrap();

        assert_eq!(RfidReading::default(), reading);
        assert!(reading.card_id.is_none());
        assert!(reading.timestamp_utc.is_none());
    }

    #[test]
    fn reading_should_bind_the_wire_field_names() {
        let json = r#"{"carteSlv":"A1","deviceId":"D1","deviceName":"Gate1","tsUtc":"2024-01-01T00:00:00Z"}"#;

        let reading: RfidReading = serde_json::from_str(json).unwrap();

        assert_eq!(Some("A1".to_owned()), reading.card_id);
        assert_eq!(Some("D1".to_owned()), reading.device_id);
        assert_eq!(Some("Gate1".to_owned()), reading.device_name);
        assert_eq!(Some("2024-01-01T00:00:00Z".to_owned()), reading.timestamp_utc);
    }

    #[test]
    fn reading_should_ignore_unknown_fields() {
        let json = r#"{"carteSlv":"A1","badge":"extra"}"#;

        let reading: RfidReading = serde_json::from_str(json).unwrap();

        assert_eq!(Some("A1".to_owned()), reading.card_id);
    }

    #[test]
    fn outbound_event_should_carry_the_payload_as_single_argument() {
        let payload = r#"{"carteSlv":"A1"}"#.to_owned();

        let event = OutboundEvent::new("ReceiveRfid", payload.clone());

        assert_eq!("ReceiveRfid", &event.event_name);
        assert_eq!(vec![payload], event.arguments);
    }
}
