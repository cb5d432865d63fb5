//! `secretdesk` HTTP server.
//!
//! Exposes list, get, create, and update operations on a managed secret
//! store as a small JSON API under `/api/secrets`, guarded by HTTP Basic
//! authentication. Every request maps onto one logical store call.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
