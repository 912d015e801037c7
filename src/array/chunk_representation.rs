use std::num::NonZeroU64;

use derive_more::Display;

use super::DataType;

/// The shape and data type of a chunk.
///
/// A read-only description of the chunk being transformed, supplied by the
/// pipeline driver and borrowed by codecs for the duration of a call.
/// Chunk dimensions must be nonzero.
#[derive(Clone, Eq, PartialEq, Debug, Display)]
#[display("{shape:?} {data_type}")]
pub struct ChunkRepresentation {
    /// The shape of the chunk.
    shape: Vec<NonZeroU64>,
    /// The data type of the chunk elements.
    data_type: DataType,
}

impl ChunkRepresentation {
    /// Create a new [`ChunkRepresentation`].
    #[must_use]
    pub fn new(shape: Vec<NonZeroU64>, data_type: DataType) -> Self {
        Self { shape, data_type }
    }

    /// Return the shape of the chunk.
    #[must_use]
    pub fn shape(&self) -> &[NonZeroU64] {
        &self.shape
    }

    /// Return the dimensionality of the chunk.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.shape.len()
    }

    /// Return the data type of the chunk.
    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Return the number of elements in the chunk.
    ///
    /// Equal to the product of its shape.
    #[must_use]
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().map(|&i| i.get()).product::<u64>()
    }

    /// Return the declared byte length of the chunk.
    ///
    /// Equal to the number of elements multiplied by the element size.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.num_elements() * self.data_type.size() as u64
    }
}
