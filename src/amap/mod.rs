//! Outbound side: the generic request adapter and envelope parsing.

pub mod client;
pub mod endpoint;
pub mod envelope;

pub use client::AmapClient;
pub use endpoint::Endpoint;
