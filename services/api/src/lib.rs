//! services/api/src/lib.rs
//!
//! The HTTP and WebSocket service around `parallax_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
