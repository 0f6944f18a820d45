use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical identifier for a screen in the catalog.
///
/// Ids are dot-segmented strings such as `billing.invoice.detail`. The engine
/// does not interpret the segments; the newtype exists so ids, API names, and
/// route strings cannot be mixed up at call sites, and so the identifier
/// serializes as a bare JSON string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(String);

/// Error raised when constructing a [`ScreenId`] from loader input.
#[derive(Debug, Error)]
pub enum ScreenIdError {
    /// Screen ids must be non-empty strings.
    #[error("screen id cannot be empty")]
    Empty,
}

impl ScreenId {
    /// Create a new screen identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ScreenIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ScreenIdError::Empty);
        }

        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the owned string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Construct from a string already known to be a valid id (one that came
    /// out of an existing `ScreenId`). Not exposed publicly.
    pub(crate) fn from_known(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ScreenId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ScreenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ScreenId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ScreenId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dot_segmented_ids() {
        let id = ScreenId::new("billing.invoice.detail").unwrap();
        assert_eq!(id.as_str(), "billing.invoice.detail");
        assert_eq!(id.to_string(), "billing.invoice.detail");
    }

    #[test]
    fn rejects_empty_id() {
        assert!(matches!(ScreenId::new(""), Err(ScreenIdError::Empty)));
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = ScreenId::new("home").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"home\"");

        let back: ScreenId = serde_json::from_str("\"home\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        assert!(serde_json::from_str::<ScreenId>("\"\"").is_err());
    }
}
