//! Clients for remote services.
//!
//! - [`ponto`]: the ponto backend that mirrors attendance events written
//!   locally, configured through the `server` section of the config.

pub mod ponto;

pub use ponto::{EventPayload, PontoApi};
