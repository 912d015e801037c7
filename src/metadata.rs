//! Utilities to support metadata with a name and optional configuration.
//!
//! The [`Metadata`] structure represents a named stage entry in a serialized
//! codec chain definition, which is structured as JSON with a name and
//! optional configuration, or just a string representing the name.
//! It provides convenience functions for converting metadata to and from a
//! configuration specific to each codec.

use serde::{de::DeserializeOwned, ser::SerializeMap, Deserialize};
use thiserror::Error;

/// Configuration metadata.
pub type MetadataConfiguration = serde_json::Map<String, serde_json::Value>;

/// Metadata with a name and optional configuration.
///
/// Can be deserialised from a JSON string or name/configuration map.
/// For example:
/// ```json
/// "zstd"
/// ```
/// or
/// ```json
/// {
///     "name": "zstd",
///     "configuration": {
///       "level": 5,
///       "checksum": true
///     }
/// }
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Metadata {
    name: String,
    configuration: Option<MetadataConfiguration>,
}

impl TryFrom<&str> for Metadata {
    type Error = serde_json::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(s)
    }
}

impl core::fmt::Display for Metadata {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(configuration) = &self.configuration {
            write!(f, "{} {:?}", self.name, configuration)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl serde::Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if let Some(configuration) = &self.configuration {
            let mut s = s.serialize_map(Some(2))?;
            s.serialize_entry("name", &self.name)?;
            s.serialize_entry("configuration", configuration)?;
            s.end()
        } else {
            s.serialize_str(self.name.as_str())
        }
    }
}

impl<'de> serde::Deserialize<'de> for Metadata {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct MetadataNameConfiguration {
            name: String,
            #[serde(default)]
            configuration: Option<MetadataConfiguration>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MetadataIntermediate {
            Name(String),
            NameConfiguration(MetadataNameConfiguration),
        }

        let metadata = MetadataIntermediate::deserialize(d)?;
        match metadata {
            MetadataIntermediate::Name(name) => Ok(Self {
                name,
                configuration: None,
            }),
            MetadataIntermediate::NameConfiguration(metadata) => Ok(Self {
                name: metadata.name,
                configuration: metadata.configuration,
            }),
        }
    }
}

impl Metadata {
    /// Create metadata from `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            configuration: None,
        }
    }

    /// Create metadata from `name` and `configuration`.
    #[must_use]
    pub fn new_with_configuration(name: &str, configuration: MetadataConfiguration) -> Self {
        Self {
            name: name.into(),
            configuration: Some(configuration),
        }
    }

    /// Convert a serializable configuration to [`Metadata`].
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if `configuration` cannot be converted to [`Metadata`].
    pub fn new_with_serializable_configuration<TConfiguration: serde::Serialize>(
        name: &str,
        configuration: &TConfiguration,
    ) -> Result<Self, serde_json::Error> {
        let configuration = serde_json::to_value(configuration)?;
        let serde_json::Value::Object(configuration) = configuration else {
            return Err(serde::ser::Error::custom(
                "the configuration does not serialize to a JSON map",
            ));
        };
        Ok(Self::new_with_configuration(name, configuration))
    }

    /// Try and convert [`Metadata`] to a serializable configuration.
    ///
    /// Missing configuration fields fall back to their defaults, and metadata
    /// without any configuration is treated as an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationInvalidError`] if the metadata cannot be converted.
    pub fn to_configuration<TConfiguration: DeserializeOwned>(
        &self,
    ) -> Result<TConfiguration, ConfigurationInvalidError> {
        let configuration = self.configuration.clone().unwrap_or_default();
        serde_json::from_value(serde_json::Value::Object(configuration))
            .map_err(|err| ConfigurationInvalidError::new(&self.name, err.to_string()))
    }

    /// Returns the metadata name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the metadata configuration.
    #[must_use]
    pub const fn configuration(&self) -> Option<&MetadataConfiguration> {
        self.configuration.as_ref()
    }
}

/// An invalid configuration error.
#[derive(Debug, Error)]
#[error("invalid {name} configuration: {details}")]
pub struct ConfigurationInvalidError {
    name: String,
    details: String,
}

impl ConfigurationInvalidError {
    /// Create a new invalid configuration error.
    #[must_use]
    pub fn new(name: &str, details: String) -> Self {
        Self {
            name: name.to_string(),
            details,
        }
    }

    /// Return the name of the invalid configuration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_name_only() {
        let metadata: Metadata = r#""zstd""#.try_into().unwrap();
        assert_eq!(metadata.name(), "zstd");
        assert!(metadata.configuration().is_none());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), r#""zstd""#);
    }

    #[test]
    fn metadata_name_configuration() {
        let json = r#"{"name":"zstd","configuration":{"level":5,"checksum":true}}"#;
        let metadata: Metadata = json.try_into().unwrap();
        assert_eq!(metadata.name(), "zstd");
        assert!(metadata.configuration().is_some());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), json);
    }

    #[test]
    fn metadata_invalid() {
        assert!(Metadata::try_from(r#"{"name":"zstd","invalid":{}}"#).is_err());
    }
}
