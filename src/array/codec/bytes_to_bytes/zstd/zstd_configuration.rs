use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zstd::zstd_safe;

/// A wrapper to handle various versions of `zstd` codec configuration parameters.
#[derive(Serialize, Clone, Eq, PartialEq, Debug, Display, From)]
#[serde(untagged)]
pub enum ZstdCodecConfiguration {
    /// Version 1.0.
    V1(ZstdCodecConfigurationV1),
}

impl<'de> serde::Deserialize<'de> for ZstdCodecConfiguration {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        // Delegates to the latest version so that field errors name the
        // offending field and its legal bounds.
        ZstdCodecConfigurationV1::deserialize(d).map(Self::V1)
    }
}

/// Configuration parameters for the `zstd` codec (version 1.0).
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct ZstdCodecConfigurationV1 {
    /// The compression level. Defaults to 5 if omitted.
    #[serde(default)]
    pub level: ZstdCompressionLevel,
    /// A boolean that indicates whether to store a checksum when writing that will be verified when reading.
    /// Defaults to true if omitted.
    #[serde(default = "default_checksum")]
    pub checksum: bool,
}

const fn default_checksum() -> bool {
    true
}

impl ZstdCodecConfigurationV1 {
    /// Create a new `zstd` codec configuration.
    #[must_use]
    pub const fn new(level: ZstdCompressionLevel, checksum: bool) -> Self {
        Self { level, checksum }
    }
}

/// A `zstd` compression level. An integer from -131072 to 22 which controls the speed and level of compression (has no impact on decoding).
///
/// A value of 0 indicates to use the default compression level.
/// Otherwise, a higher level is expected to achieve a higher compression ratio at the cost of lower speed.
#[derive(Serialize, Copy, Clone, Eq, PartialEq, Debug)]
pub struct ZstdCompressionLevel(zstd_safe::CompressionLevel);

/// An invalid `zstd` compression level.
#[derive(Debug, Error)]
#[error("invalid zstd compression level {_0}, must be an integer between -131072 and 22")]
pub struct ZstdCompressionLevelError(i64);

impl ZstdCompressionLevel {
    /// The minimum supported compression level.
    pub const MIN: i32 = -131_072;

    /// The maximum supported compression level.
    pub const MAX: i32 = 22;

    /// Create a new `zstd` compression level.
    ///
    /// # Errors
    /// Returns [`ZstdCompressionLevelError`] if `level` is outside of the range supported by `zstd`.
    pub fn new(level: i32) -> Result<Self, ZstdCompressionLevelError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ZstdCompressionLevelError(i64::from(level)))
        }
    }

    /// Return the compression level as an [`i32`].
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl Default for ZstdCompressionLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<i32> for ZstdCompressionLevel {
    type Error = ZstdCompressionLevelError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ZstdCompressionLevel> for zstd_safe::CompressionLevel {
    fn from(value: ZstdCompressionLevel) -> Self {
        value.0
    }
}

impl<'de> serde::Deserialize<'de> for ZstdCompressionLevel {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(d)?;
        if let Some(level) = number.as_i64() {
            if let Ok(level) = i32::try_from(level) {
                if let Ok(level) = Self::new(level) {
                    return Ok(level);
                }
            }
        }
        Err(serde::de::Error::custom(
            "zstd compression level must be an integer between -131072 and 22",
        ))
    }
}
