//! Adapter implementations of the ports.
//!
//! Inbound adapters (http, websocket) translate transport requests
//! into application calls; outbound adapters (storage, events, auth)
//! implement the ports the application depends on.

pub mod auth;
pub mod events;
pub mod http;
pub mod storage;
pub mod websocket;
