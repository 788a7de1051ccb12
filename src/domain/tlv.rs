//! Tag-length-value writer for EMVCo-style QR payloads.
//!
//! Each field is a 2-digit tag, a 2-digit decimal length and the value.

/// Accumulates fields into a flat payload string.
#[derive(Debug, Default, Clone)]
pub struct TlvWriter {
    buf: String,
}

impl TlvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag` + length of `value` + `value`.
    ///
    /// Values longer than 99 bytes cannot be represented; the length is
    /// written as-is so the caller's fixed layout stays visible.
    pub fn field(&mut self, tag: u8, value: &str) -> &mut Self {
        self.buf.push_str(&format!("{:02}{:02}{}", tag, value.len(), value));
        self
    }

    /// Appends a segment verbatim, header included.
    ///
    /// Used for segments whose declared length is part of the deployed format
    /// and is not derived from the value.
    pub fn raw(&mut self, segment: &str) -> &mut Self {
        self.buf.push_str(segment);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Renders a single field, e.g. `field(58, "KH")` -> `5802KH`.
pub fn field(tag: u8, value: &str) -> String {
    let mut writer = TlvWriter::new();
    writer.field(tag, value);
    writer.finish()
}
