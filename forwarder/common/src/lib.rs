use hub_relay_common_api::{InboundEvent, OutboundEvent};
use thiserror::Error;

/// A Forwarder relays inbound hub events to an output channel.
/// It inspects the raw payload for diagnostic purposes and republishes it,
/// unmodified, as zero or more OutboundEvents.
pub trait Forwarder {
    /// Consumes an InboundEvent and produces the OutboundEvents to publish.
    /// An empty vector is a valid outcome and means nothing is forwarded.
    fn forward(&self, event: &InboundEvent) -> Result<Vec<OutboundEvent>, ForwarderError>;
}

#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("DecodeFailure: [{message}]")]
    DecodeFailure { message: String },
    #[error("ForwarderCreationError: [{message}]")]
    ForwarderCreationError { message: String },
}
