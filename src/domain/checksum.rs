//! CRC-16/CCITT-FALSE checksum used by the KHQR `63` field.
//!
//! Polynomial `0x1021`, initial value `0xFFFF`, no reflection and no final XOR.
//! Input is treated as raw bytes so non-ASCII text has a defined result.

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Computes the raw 16-bit checksum of `input`.
pub fn crc16_ccitt_false(input: &[u8]) -> u16 {
    input.iter().fold(INITIAL, |mut crc, &byte| {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// Computes the checksum of `input` rendered as 4 uppercase hex digits.
pub fn compute_checksum(input: impl AsRef<[u8]>) -> String {
    format!("{:04X}", crc16_ccitt_false(input.as_ref()))
}
