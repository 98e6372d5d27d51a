use actix::prelude::Message;
use hub_relay_common_api::OutboundEvent;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayActorError {
    #[error("SerdeError: [{message}]")]
    SerdeError { message: String },
    #[error("GenericError: [{message}]")]
    GenericError { message: String },
}

/// An event ready to be published on the target hub.
#[derive(Message, Debug)]
#[rtype(result = "Result<(), RelayActorError>")]
pub struct OutboundMessage {
    pub event: OutboundEvent,
}

/// A raw delivery from the backplane, before the envelope is decoded.
#[derive(Message)]
#[rtype(result = "Result<(), RelayActorError>")]
pub struct BytesMessage {
    pub msg: Vec<u8>,
}
