//! A pluggable codec core for a chunked N-dimensional array storage format.
//!
//! Each stored array chunk passes through an ordered sequence of reversible
//! byte-transform codecs before being written to, and in the opposite order
//! after being read from, underlying storage.
//! This crate defines the uniform contract shared by every transform stage
//! (see [`array::codec`]) and a `zstd` compression codec implementing it.
//!
//! The array metadata model, chunk addressing, and storage backends are
//! external collaborators.
//! They are consumed through the narrow [`Metadata`](metadata::Metadata) and
//! [`ChunkRepresentation`](array::ChunkRepresentation) interfaces and are
//! otherwise out of scope.
//!
//! ## Example
//! ```rust
//! use chunk_codec::array::codec::Codec;
//! use chunk_codec::array::{ChunkRepresentation, DataType};
//! use chunk_codec::metadata::Metadata;
//! # use std::num::NonZeroU64;
//!
//! let metadata: Metadata =
//!     r#"{"name":"zstd","configuration":{"level":9,"checksum":true}}"#.try_into()?;
//! let codec = Codec::from_metadata(&metadata)?;
//!
//! let shape = vec![NonZeroU64::new(8).unwrap(), NonZeroU64::new(8).unwrap()];
//! let chunk_representation = ChunkRepresentation::new(shape, DataType::UInt16);
//! let chunk_bytes: Vec<u8> = vec![0; usize::try_from(chunk_representation.size()).unwrap()];
//!
//! let codec = codec.as_bytes_to_bytes();
//! let encoded = codec.encode(chunk_bytes.clone(), &chunk_representation)?;
//! let decoded = codec.decode(encoded, &chunk_representation)?;
//! assert_eq!(chunk_bytes, decoded);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]

pub mod array;
pub mod metadata;
