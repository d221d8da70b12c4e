//! The serialized form of a document handed to a renderer.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::CvDocument;

/// A document as a nested mapping of section name to section fields.
///
/// Keys are exactly [`Context::KEYS`]. Optional sections that were absent from
/// the source appear with their empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Top-level keys, in document order.
    pub const KEYS: [&'static str; 6] = [
        "datos",
        "formacion",
        "idiomas",
        "experiencia",
        "habilidades",
        "portafolio",
    ];

    /// Serializes `document`.
    ///
    /// # Errors
    ///
    /// Returns an error if a section cannot be represented as JSON.
    pub fn from_document(document: &CvDocument) -> serde_json::Result<Self> {
        let sections = [
            serde_json::to_value(document.personal())?,
            serde_json::to_value(document.education())?,
            serde_json::to_value(document.languages())?,
            serde_json::to_value(document.experience())?,
            serde_json::to_value(document.skills())?,
            serde_json::to_value(document.portfolio())?,
        ];

        Ok(Self(
            Self::KEYS
                .into_iter()
                .map(str::to_owned)
                .zip(sections)
                .collect(),
        ))
    }

    /// The value of one top-level section.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into a plain JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }

    /// Compact JSON, used to compare contexts byte for byte.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}
