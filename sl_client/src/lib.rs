//! Internal modules for the ScholarLink client.
//!
//! This library provides the HTTP API client used by the sl_client
//! binary and exposes it for integration tests.

pub mod api_client;
