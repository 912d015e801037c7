use std::io::Write;

use crate::{
    array::{
        codec::{BytesToBytesCodecTraits, CodecError, CodecTraits},
        ChunkRepresentation,
    },
    metadata::Metadata,
};

use super::{
    ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel, IDENTIFIER,
};

/// A `zstd` codec implementation.
#[derive(Clone, Debug)]
pub struct ZstdCodec {
    compression: ZstdCompressionLevel,
    checksum: bool,
}

impl ZstdCodec {
    /// Create a new `zstd` codec.
    #[must_use]
    pub const fn new(compression: ZstdCompressionLevel, checksum: bool) -> Self {
        Self {
            compression,
            checksum,
        }
    }

    /// Create a new `zstd` codec from configuration.
    #[must_use]
    pub fn new_with_configuration(configuration: &ZstdCodecConfiguration) -> Self {
        let ZstdCodecConfiguration::V1(configuration) = configuration;
        Self {
            compression: configuration.level,
            checksum: configuration.checksum,
        }
    }
}

impl CodecTraits for ZstdCodec {
    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }

    fn create_metadata(&self) -> Option<Metadata> {
        let configuration = ZstdCodecConfigurationV1::new(self.compression, self.checksum);
        Some(Metadata::new_with_serializable_configuration(IDENTIFIER, &configuration).unwrap())
    }
}

impl BytesToBytesCodecTraits for ZstdCodec {
    fn encode(
        &self,
        decoded_value: Vec<u8>,
        _chunk_representation: &ChunkRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        let encode_err = |source| CodecError::Encode {
            codec: IDENTIFIER,
            source,
        };
        let mut encoder =
            zstd::Encoder::new(Vec::new(), self.compression.as_i32()).map_err(encode_err)?;
        encoder.include_checksum(self.checksum).map_err(encode_err)?;
        // Pledge the input length so the frame self-describes its decompressed size.
        encoder.include_contentsize(true).map_err(encode_err)?;
        encoder
            .set_pledged_src_size(Some(decoded_value.len() as u64))
            .map_err(encode_err)?;
        encoder.write_all(&decoded_value).map_err(encode_err)?;
        encoder.finish().map_err(encode_err)
    }

    fn decode(
        &self,
        encoded_value: Vec<u8>,
        _chunk_representation: &ChunkRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        // Streaming decompression into a growable buffer. The embedded
        // checksum, if any, is verified as the frame is consumed.
        zstd::decode_all(encoded_value.as_slice()).map_err(|source| CodecError::Decode {
            codec: IDENTIFIER,
            source,
        })
    }

    fn compute_encoded_size(
        &self,
        _decoded_value_size: u64,
        _chunk_representation: &ChunkRepresentation,
    ) -> Result<u64, CodecError> {
        // Compressed size is content dependent and unknowable until encode runs.
        Err(CodecError::UnsupportedEncodedSize(IDENTIFIER))
    }
}
