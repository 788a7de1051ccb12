//! Domain layer: the KHQR payload format and the ports the service depends on.

pub mod amount;
pub mod checksum;
pub mod merchant;
pub mod payload;
pub mod ports;
pub mod tlv;
