use thiserror::Error;

pub mod actors;

#[derive(Error, Debug)]
pub enum HubRelayError {
    #[error("ConfigurationError: {message}")]
    ConfigurationError { message: String },
    #[error("SubscriptionError: {message}")]
    SubscriptionError { message: String },
}
