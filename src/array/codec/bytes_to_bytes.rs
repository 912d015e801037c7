//! Bytes to bytes codecs.

pub mod zstd;
