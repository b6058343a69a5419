//! HTTP API server for shopping list management.

pub mod http;
pub mod service;
