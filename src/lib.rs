pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use domain::checksum::compute_checksum;
pub use domain::payload::{Payload, build_payload, build_payload_at, verify_payload};
