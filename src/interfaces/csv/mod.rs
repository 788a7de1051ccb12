//! Batch mode: CSV requests in, CSV payloads out.

pub mod payload_writer;
pub mod request_reader;
