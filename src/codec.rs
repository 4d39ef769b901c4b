//! Decoding of fixed-width big-endian values from byte buffers.
//!
//! These are the pure building blocks used wherever a length-framed
//! payload has already been read into a scratch buffer and needs to be
//! split into host-native values. Stream reads go through
//! [`crate::input::Input`] instead.

pub(crate) fn read_u16_be(buf: [u8; 2]) -> u16 {
    u16::from_be_bytes(buf)
}

pub(crate) fn read_u32_be(buf: [u8; 4]) -> u32 {
    u32::from_be_bytes(buf)
}

pub(crate) fn read_u64_be(buf: [u8; 8]) -> u64 {
    u64::from_be_bytes(buf)
}

/// Bit-reinterpretation of [`read_u32_be`]; NaN payloads pass through
/// untouched.
pub(crate) fn read_f32_be(buf: [u8; 4]) -> f32 {
    f32::from_bits(read_u32_be(buf))
}

/// Bit-reinterpretation of [`read_u64_be`]; NaN payloads pass through
/// untouched.
pub(crate) fn read_f64_be(buf: [u8; 8]) -> f64 {
    f64::from_bits(read_u64_be(buf))
}
