//! Chunk array types.
//!
//! A chunk is a fixed-size contiguous slice of a larger N-dimensional array, the
//! unit of independent storage and compression.
//! [`ChunkRepresentation`] describes the chunk being transformed by a
//! [codec](crate::array::codec) and is supplied by the surrounding pipeline.

pub mod codec;

mod chunk_representation;
mod data_type;

pub use chunk_representation::ChunkRepresentation;
pub use data_type::DataType;
