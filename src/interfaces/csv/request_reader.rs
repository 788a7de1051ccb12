use crate::application::service::GenerateRequest;
use crate::error::{KhqrError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// One `id,amount` row of a batch file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BatchRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub amount: String,
}

impl From<BatchRecord> for GenerateRequest {
    fn from(record: BatchRecord) -> Self {
        Self {
            amount: Value::String(record.amount),
            id: record.id,
        }
    }
}

/// Reads generation requests from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one request per row.
    pub fn requests(self) -> impl Iterator<Item = Result<GenerateRequest>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|record: BatchRecord| record.into())
                .map_err(KhqrError::from)
        })
    }
}
