//! # Expandable Fields
//!
//! Reference fields come back either as a bare id (`"cus_123"`) or, when the
//! request asked to expand them, as the full nested object. [`Expandable`]
//! keeps whichever form the server sent.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything addressable by an id and tagged with an object name.
pub trait HasId {
    fn id(&self) -> &str;

    /// The wire `object` tag, e.g. `"charge"`.
    fn object(&self) -> &str;
}

/// A reference that is either unexpanded (id only) or fully expanded.
#[derive(Debug, Clone, PartialEq)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T> Expandable<T> {
    pub fn is_expanded(&self) -> bool {
        matches!(self, Expandable::Object(_))
    }

    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Object(obj) => Some(obj.as_ref()),
            Expandable::Id(_) => None,
        }
    }

    pub fn into_object(self) -> Option<T> {
        match self {
            Expandable::Object(obj) => Some(*obj),
            Expandable::Id(_) => None,
        }
    }
}

impl<T: HasId> Expandable<T> {
    /// The referenced id, whichever form was received.
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(obj) => obj.id(),
        }
    }
}

impl<T: DeserializeOwned> Expandable<T> {
    /// Decodes raw bytes, taking the bare-id path without a full parse.
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        if let Some(id) = parse_id(data) {
            return Ok(Expandable::Id(id));
        }
        serde_json::from_slice::<T>(data).map(|obj| Expandable::Object(Box::new(obj)))
    }
}

impl<T> From<String> for Expandable<T> {
    fn from(id: String) -> Self {
        Expandable::Id(id)
    }
}

impl<T> From<&str> for Expandable<T> {
    fn from(id: &str) -> Self {
        Expandable::Id(id.to_owned())
    }
}

/// Returns the id if `data` is a JSON string rather than an object.
pub fn parse_id(data: &[u8]) -> Option<String> {
    let start = data.iter().position(|b| !b.is_ascii_whitespace())?;
    if data[start] != b'"' {
        return None;
    }
    serde_json::from_slice::<String>(&data[start..]).ok()
}

impl<T: Serialize> Serialize for Expandable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expandable::Id(id) => serializer.serialize_str(id),
            Expandable::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Expandable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(Expandable::Id(id)),
            other => T::deserialize(other)
                .map(|obj| Expandable::Object(Box::new(obj)))
                .map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    struct Customer {
        id: String,
        object: String,
        email: String,
    }

    impl HasId for Customer {
        fn id(&self) -> &str {
            &self.id
        }

        fn object(&self) -> &str {
            &self.object
        }
    }

    #[test]
    fn test_bare_id_stays_unexpanded() {
        let c: Expandable<Customer> = serde_json::from_str("\"cus_123\"").unwrap();
        assert_eq!(c, Expandable::Id("cus_123".into()));
        assert!(!c.is_expanded());
        assert_eq!(c.id(), "cus_123");
        assert!(c.as_object().is_none());
    }

    #[test]
    fn test_object_is_expanded() {
        let c: Expandable<Customer> = serde_json::from_str(
            r#"{"id":"cus_123","object":"customer","email":"a@b.co"}"#,
        )
        .unwrap();
        assert!(c.is_expanded());
        assert_eq!(c.id(), "cus_123");
        assert_eq!(c.as_object().unwrap().email, "a@b.co");
    }

    #[test]
    fn test_malformed_object_surfaces_error() {
        let err = serde_json::from_str::<Expandable<Customer>>(r#"{"id":42}"#);
        assert!(err.is_err());
        assert!(serde_json::from_str::<Expandable<Customer>>("17").is_err());
    }

    #[test]
    fn test_serialize_keeps_form() {
        let id: Expandable<Customer> = "cus_9".into();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cus_9\"");

        let obj = Expandable::Object(Box::new(Customer {
            id: "cus_9".into(),
            object: "customer".into(),
            email: "x@y.z".into(),
        }));
        assert_eq!(
            serde_json::to_string(&obj).unwrap(),
            r#"{"id":"cus_9","object":"customer","email":"x@y.z"}"#
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(b"\"ch_1\""), Some("ch_1".into()));
        assert_eq!(parse_id(b"  \"ch_1\"\n"), Some("ch_1".into()));
        assert_eq!(parse_id(b"{\"id\":\"ch_1\"}"), None);
        assert_eq!(parse_id(b"\""), None);
        assert_eq!(parse_id(b""), None);
    }

    #[test]
    fn test_from_slice() {
        let c = Expandable::<Customer>::from_slice(b"\"cus_1\"").unwrap();
        assert_eq!(c.id(), "cus_1");
        let c = Expandable::<Customer>::from_slice(
            br#"{"id":"cus_2","object":"customer","email":""}"#,
        )
        .unwrap();
        assert!(c.is_expanded());
    }
}
