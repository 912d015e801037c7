//! Chunk codecs.
//!
//! Array chunks are encoded using a sequence of codecs, each of which specifies
//! a bidirectional transform (an encode transform and a decode transform) over
//! an opaque byte buffer.
//! Codecs are applied in order on the store path and in the opposite order on
//! the read path.
//!
//! Every codec implements the [`BytesToBytesCodecTraits`] contract and is a
//! variant of the closed [`Codec`] set, dispatched by its identifier.
//! Adding a codec means adding a variant and an implementation of the shared
//! contract.
//!
//! Codecs are immutable after construction and hold no per-call state, so a
//! single instance can be shared across threads processing distinct chunks.

pub mod bytes_to_bytes;

pub use bytes_to_bytes::zstd::{
    ZstdCodec, ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel,
    ZstdCompressionLevelError,
};

use thiserror::Error;

use crate::{
    array::ChunkRepresentation,
    metadata::{ConfigurationInvalidError, Metadata},
};

/// Codec traits.
pub trait CodecTraits: Send + Sync {
    /// Unique identifier for the codec.
    ///
    /// An identical identifier implies an identical wire-format interpretation
    /// across codec chains.
    fn identifier(&self) -> &'static str;

    /// Create metadata.
    ///
    /// A hidden codec (e.g. a cache) will return [`None`], since it will not have
    /// any associated metadata.
    fn create_metadata(&self) -> Option<Metadata>;
}

/// Traits for bytes to bytes codecs.
pub trait BytesToBytesCodecTraits: CodecTraits + dyn_clone::DynClone + core::fmt::Debug {
    /// Encode chunk bytes.
    ///
    /// Deterministic for a fixed codec configuration and input.
    /// The returned buffer is independently owned and does not alias
    /// `decoded_value`.
    ///
    /// # Errors
    /// Returns [`CodecError`] if the underlying transform fails.
    fn encode(
        &self,
        decoded_value: Vec<u8>,
        chunk_representation: &ChunkRepresentation,
    ) -> Result<Vec<u8>, CodecError>;

    /// Decode chunk bytes.
    ///
    /// The left inverse of [`encode`](BytesToBytesCodecTraits::encode) for any
    /// output it could have produced under the same configuration.
    ///
    /// # Errors
    /// Returns [`CodecError`] if `encoded_value` is truncated, corrupted, or the
    /// underlying transform fails.
    /// Partially decoded bytes are never returned.
    fn decode(
        &self,
        encoded_value: Vec<u8>,
        chunk_representation: &ChunkRepresentation,
    ) -> Result<Vec<u8>, CodecError>;

    /// Return the exact encoded byte length for a decoded value of `decoded_value_size` bytes.
    ///
    /// Only supported by codecs whose output length is a pure function of the
    /// input length and chunk shape.
    ///
    /// # Errors
    /// Returns [`CodecError::UnsupportedEncodedSize`] if the encoded size is
    /// data dependent and unknowable until [`encode`](BytesToBytesCodecTraits::encode)
    /// runs.
    /// Callers must not pre-size storage for such codecs.
    fn compute_encoded_size(
        &self,
        decoded_value_size: u64,
        chunk_representation: &ChunkRepresentation,
    ) -> Result<u64, CodecError>;
}

dyn_clone::clone_trait_object!(BytesToBytesCodecTraits);

/// A codec, one variant per supported codec identifier.
#[derive(Clone, Debug)]
pub enum Codec {
    /// The `zstd` compression codec.
    Zstd(ZstdCodec),
}

impl Codec {
    /// Create a codec from metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CodecCreateError`] if the metadata name is not a supported
    /// codec identifier or its configuration is invalid.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, CodecCreateError> {
        match metadata.name() {
            bytes_to_bytes::zstd::IDENTIFIER => Ok(Self::Zstd(
                ZstdCodec::new_with_configuration(&metadata.to_configuration()?),
            )),
            name => Err(CodecCreateError::Unsupported(name.to_string())),
        }
    }

    /// Return a reference to the codec as a [`BytesToBytesCodecTraits`] object.
    #[must_use]
    pub fn as_bytes_to_bytes(&self) -> &dyn BytesToBytesCodecTraits {
        match self {
            Self::Zstd(codec) => codec,
        }
    }

    /// Unique identifier for the codec.
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        self.as_bytes_to_bytes().identifier()
    }

    /// Create metadata describing the codec and its configuration.
    #[must_use]
    pub fn create_metadata(&self) -> Option<Metadata> {
        self.as_bytes_to_bytes().create_metadata()
    }
}

/// A codec creation error.
#[derive(Debug, Error)]
pub enum CodecCreateError {
    /// An unsupported codec.
    #[error("codec {_0} is not supported")]
    Unsupported(String),
    /// Invalid configuration.
    #[error(transparent)]
    ConfigurationInvalid(#[from] ConfigurationInvalidError),
}

/// A codec error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying transform failed to encode a chunk.
    #[error("the {codec} codec failed to encode a chunk: {source}")]
    Encode {
        /// The identifier of the responsible codec.
        codec: &'static str,
        /// The low-level cause.
        source: std::io::Error,
    },
    /// The encoded bytes are truncated, corrupted, or otherwise undecodable.
    #[error("the {codec} codec failed to decode a chunk: {source}")]
    Decode {
        /// The identifier of the responsible codec.
        codec: &'static str,
        /// The low-level cause.
        source: std::io::Error,
    },
    /// The encoded size is data dependent and cannot be computed before encoding.
    #[error("the encoded size of the {_0} codec is data dependent and cannot be computed")]
    UnsupportedEncodedSize(&'static str),
    /// Other
    #[error("{_0}")]
    Other(String),
}

impl From<&str> for CodecError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CodecError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_from_metadata() {
        let metadata: Metadata =
            r#"{"name":"zstd","configuration":{"level":22,"checksum":false}}"#
                .try_into()
                .unwrap();
        let codec = Codec::from_metadata(&metadata).unwrap();
        assert_eq!(codec.identifier(), "zstd");
    }

    #[test]
    fn codec_from_metadata_name_only() {
        // All zstd configuration fields have defaults.
        let metadata: Metadata = r#""zstd""#.try_into().unwrap();
        let codec = Codec::from_metadata(&metadata).unwrap();
        assert_eq!(codec.identifier(), "zstd");
    }

    #[test]
    fn codec_from_metadata_unsupported() {
        let metadata: Metadata = r#""vlen""#.try_into().unwrap();
        assert!(matches!(
            Codec::from_metadata(&metadata),
            Err(CodecCreateError::Unsupported(_))
        ));
    }

    #[test]
    fn codec_from_metadata_invalid_configuration() {
        let metadata: Metadata = r#"{"name":"zstd","configuration":{"level":23}}"#
            .try_into()
            .unwrap();
        assert!(matches!(
            Codec::from_metadata(&metadata),
            Err(CodecCreateError::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn codec_metadata_round_trip() {
        let metadata: Metadata =
            r#"{"name":"zstd","configuration":{"level":-131072,"checksum":true}}"#
                .try_into()
                .unwrap();
        let codec = Codec::from_metadata(&metadata).unwrap();
        assert_eq!(codec.create_metadata().unwrap(), metadata);
    }
}
