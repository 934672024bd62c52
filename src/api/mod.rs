//! Crafty Controller v2 API integration.
//!
//! [`CraftyClient`] builds requests against the panel's fixed routes, sends
//! them through a [`Transport`] and unwraps the response [`Envelope`],
//! turning the panel's error codes into typed errors.

mod client;
mod envelope;
mod roles;
pub mod routes;
mod schedules;
mod schema;
mod servers;
mod transport;
mod users;

pub use client::CraftyClient;
pub use envelope::Envelope;
pub use transport::{ApiRequest, HttpTransport, RequestBody, Transport};
