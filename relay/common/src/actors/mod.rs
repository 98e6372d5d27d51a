pub mod message;
pub mod nats_publisher;
pub mod nats_subscriber;
