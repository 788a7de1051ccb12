//! Application layer: orchestrates validation, payload building and caching.
//!
//! `KhqrService` is the entry point shared by the HTTP server and the CLI.

pub mod service;
