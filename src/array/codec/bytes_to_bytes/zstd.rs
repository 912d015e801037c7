//! The `zstd` bytes to bytes codec.
//!
//! Applies [Zstandard](https://facebook.github.io/zstd/) compression with a
//! configurable compression level and optional content checksum.
//!
//! The encoded size of a chunk depends on its content, so
//! [`compute_encoded_size`](crate::array::codec::BytesToBytesCodecTraits::compute_encoded_size)
//! is unsupported for this codec.

mod zstd_codec;
mod zstd_configuration;

pub use zstd_codec::ZstdCodec;
pub use zstd_configuration::{
    ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel,
    ZstdCompressionLevelError,
};

/// The identifier of the `zstd` codec.
pub const IDENTIFIER: &str = "zstd";

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;
    use std::sync::Arc;

    use crate::array::{
        codec::{BytesToBytesCodecTraits, CodecError},
        ChunkRepresentation, DataType,
    };

    use super::*;

    const JSON_VALID: &str = r#"{
    "level": 22,
    "checksum": false
}"#;

    fn chunk_representation(num_elements: u64) -> ChunkRepresentation {
        ChunkRepresentation::new(
            vec![NonZeroU64::new(num_elements.max(1)).unwrap()],
            DataType::UInt8,
        )
    }

    fn codec_from_json(json: &str) -> ZstdCodec {
        let configuration: ZstdCodecConfiguration = serde_json::from_str(json).unwrap();
        ZstdCodec::new_with_configuration(&configuration)
    }

    fn round_trip(codec: &ZstdCodec, bytes: Vec<u8>) {
        let chunk_representation = chunk_representation(bytes.len() as u64);
        let encoded = codec.encode(bytes.clone(), &chunk_representation).unwrap();
        let decoded = codec.decode(encoded, &chunk_representation).unwrap();
        assert_eq!(bytes, decoded);
    }

    #[test]
    fn codec_zstd_round_trip1() {
        let bytes: Vec<u8> = (0..64).map(|i| i % 7).collect();
        round_trip(&codec_from_json(JSON_VALID), bytes);
    }

    #[test]
    fn codec_zstd_round_trip_empty() {
        round_trip(&codec_from_json(JSON_VALID), vec![]);
    }

    #[test]
    fn codec_zstd_round_trip_single_byte() {
        round_trip(&codec_from_json(r#"{"level": 5, "checksum": true}"#), vec![42]);
    }

    #[test]
    fn codec_zstd_round_trip_large() {
        // 4 MiB of moderately compressible bytes.
        let bytes: Vec<u8> = (0..4 * 1024 * 1024u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8 & 0x3f)
            .collect();
        for json in [
            r#"{"level": -131072, "checksum": false}"#,
            r#"{"level": 1, "checksum": true}"#,
            r#"{"level": 5, "checksum": true}"#,
        ] {
            round_trip(&codec_from_json(json), bytes.clone());
        }
    }

    #[test]
    fn codec_zstd_deterministic() {
        let bytes: Vec<u8> = (0..1024u32).map(|i| (i % 251) as u8).collect();
        let codec = codec_from_json(r#"{"level": 5, "checksum": true}"#);
        let chunk_representation = chunk_representation(bytes.len() as u64);
        let encoded1 = codec.encode(bytes.clone(), &chunk_representation).unwrap();
        let encoded2 = codec.encode(bytes, &chunk_representation).unwrap();
        assert_eq!(encoded1, encoded2);
    }

    #[test]
    fn codec_zstd_decode_truncated() {
        let bytes: Vec<u8> = (0..1024u32).map(|i| (i % 251) as u8).collect();
        let codec = codec_from_json(r#"{"level": 5, "checksum": true}"#);
        let chunk_representation = chunk_representation(bytes.len() as u64);
        let encoded = codec.encode(bytes, &chunk_representation).unwrap();

        let truncated = encoded[..encoded.len() / 2].to_vec();
        assert!(matches!(
            codec.decode(truncated, &chunk_representation),
            Err(CodecError::Decode { codec: "zstd", .. })
        ));
    }

    #[test]
    fn codec_zstd_decode_corrupted() {
        let bytes: Vec<u8> = (0..1024u32).map(|i| (i % 251) as u8).collect();
        let codec = codec_from_json(r#"{"level": 5, "checksum": true}"#);
        let chunk_representation = chunk_representation(bytes.len() as u64);
        let encoded = codec.encode(bytes, &chunk_representation).unwrap();

        // Clobber the frame header.
        let mut corrupted = encoded.clone();
        for byte in corrupted.iter_mut().take(4) {
            *byte = !*byte;
        }
        assert!(matches!(
            codec.decode(corrupted, &chunk_representation),
            Err(CodecError::Decode { codec: "zstd", .. })
        ));

        // Flip a bit in the checksum trailer; verification rejects the frame.
        let mut mutated = encoded;
        let last = mutated.len() - 1;
        mutated[last] ^= 0x80;
        assert!(codec.decode(mutated, &chunk_representation).is_err());
    }

    #[test]
    fn codec_zstd_compute_encoded_size_unsupported() {
        let codec = codec_from_json(JSON_VALID);
        for decoded_value_size in [0u64, 1, 1024, 1 << 30] {
            assert!(matches!(
                codec.compute_encoded_size(
                    decoded_value_size,
                    &chunk_representation(decoded_value_size)
                ),
                Err(CodecError::UnsupportedEncodedSize("zstd"))
            ));
        }
    }

    #[test]
    fn codec_zstd_concurrent_use() {
        let codec = Arc::new(codec_from_json(r#"{"level": 5, "checksum": true}"#));
        let inputs: Vec<Vec<u8>> = (0..8u8)
            .map(|t| (0..64 * 1024u32).map(|i| (i % (u32::from(t) + 101)) as u8).collect())
            .collect();

        let sequential: Vec<Vec<u8>> = inputs
            .iter()
            .map(|input| {
                codec
                    .encode(input.clone(), &chunk_representation(input.len() as u64))
                    .unwrap()
            })
            .collect();

        let handles: Vec<_> = inputs
            .iter()
            .cloned()
            .map(|input| {
                let codec = codec.clone();
                std::thread::spawn(move || {
                    let chunk_representation = chunk_representation(input.len() as u64);
                    let encoded = codec.encode(input.clone(), &chunk_representation).unwrap();
                    let decoded = codec
                        .decode(encoded.clone(), &chunk_representation)
                        .unwrap();
                    assert_eq!(input, decoded);
                    encoded
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(sequential) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
