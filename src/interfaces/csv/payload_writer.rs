use crate::application::service::GeneratedQr;
use crate::domain::merchant::MerchantIdentity;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PayloadRecord<'a> {
    id: MerchantIdentity,
    amount: String,
    qr_string: &'a str,
    md5_hash: &'a str,
}

/// Writes generated payloads as `id,amount,qr_string,md5_hash` rows.
pub struct PayloadWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, generated: &GeneratedQr) -> Result<()> {
        let amount = match &generated.amount {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.writer.serialize(PayloadRecord {
            id: generated.id,
            amount,
            qr_string: generated.qr_string.as_str(),
            md5_hash: &generated.md5_hash,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
