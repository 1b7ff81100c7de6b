//! subclaim
//!
//! Claim a subdomain under a fixed parent domain and point it at a service.
//!
//! A small HTTP service in front of a hosted DNS provider's API. Clients first
//! [check that a label is free][gateway::Gateway::check_availability], then
//! [create a verification `TXT` record and a routing `A` record][gateway::Gateway::create_records]
//! for it. No state is kept between requests; the DNS provider is the system of record.
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod validate;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use gateway::{Gateway, SharedGateway};
pub use provider::{DigitalOceanProvider, InMemoryProvider};
