//! Estimation Hub - Collaborative estimation session backend
//!
//! This crate implements planning-poker style estimation sessions:
//! short-lived sessions that members join to size tasks by voting,
//! with live updates pushed to connected clients over WebSockets.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
