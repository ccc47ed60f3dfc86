//! # Discriminated Objects
//!
//! Helpers for fields that hold one of several resource kinds, selected by
//! the nested object's `object` (or `type`) field. Resource crates build
//! their union enums on top of these: read the discriminator, decode the
//! matching variant, and fall back to [`UnknownObject`] for kinds this build
//! does not model.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::expandable::HasId;

/// An object whose discriminator is not modelled. The raw fields are kept
/// so that nothing is lost on re-encode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownObject {
    pub id: String,
    pub object: String,
    pub raw: Map<String, Value>,
}

impl UnknownObject {
    pub fn from_map(raw: Map<String, Value>, discriminator_field: &str) -> Self {
        Self {
            id: string_field(&raw, "id").to_owned(),
            object: string_field(&raw, discriminator_field).to_owned(),
            raw,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

impl HasId for UnknownObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

impl Serialize for UnknownObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnknownObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(raw, "object"))
    }
}

/// Reads a string field, empty when missing or not a string.
pub fn string_field<'a>(map: &'a Map<String, Value>, field: &str) -> &'a str {
    map.get(field).and_then(Value::as_str).unwrap_or_default()
}

/// Unwraps a JSON object, or fails with a message naming what was expected.
pub fn expect_object<E: de::Error>(value: Value, expected: &'static str) -> Result<Map<String, Value>, E> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(E::invalid_type(unexpected(&other), &expected)),
    }
}

/// Decodes one concrete variant from an already-parsed object.
pub fn decode_variant<T: DeserializeOwned, E: de::Error>(map: Map<String, Value>) -> Result<Box<T>, E> {
    T::deserialize(Value::Object(map))
        .map(Box::new)
        .map_err(E::custom)
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

/// Declares an enum over resource kinds selected by the `object` field.
///
/// Each variant boxes one resource type; an extra `Unknown` variant keeps
/// objects whose discriminator is not listed.
///
/// ```rust,ignore
/// stripe_core::object_union! {
///     pub enum PayoutDestination {
///         BankAccount(BankAccount) = "bank_account",
///         Card(Card) = "card",
///     }
/// }
/// ```
#[macro_export]
macro_rules! object_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant(::std::boxed::Box<$ty>), )*
            /// A kind not modelled by this enum, raw fields preserved.
            Unknown($crate::polymorphic::UnknownObject),
        }

        #[allow(dead_code)]
        impl $name {
            /// Discriminators with a typed variant.
            pub const KNOWN: &'static [&'static str] = &[$($wire),*];

            /// The `object` discriminator as received.
            pub fn object(&self) -> &str {
                match self {
                    $( $name::$variant(_) => $wire, )*
                    $name::Unknown(unknown) => unknown.object.as_str(),
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl $crate::expandable::HasId for $name {
            fn id(&self) -> &str {
                match self {
                    $( $name::$variant(inner) => $crate::expandable::HasId::id(inner.as_ref()), )*
                    $name::Unknown(unknown) => unknown.id.as_str(),
                }
            }

            fn object(&self) -> &str {
                $name::object(self)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                match self {
                    $( $name::$variant(inner) => $crate::__serde::Serialize::serialize(inner.as_ref(), serializer), )*
                    $name::Unknown(unknown) => $crate::__serde::Serialize::serialize(unknown, serializer),
                }
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let value = <$crate::__serde_json::Value as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                let map = $crate::polymorphic::expect_object::<D::Error>(value, stringify!($name))?;
                let kind = $crate::polymorphic::string_field(&map, "object").to_owned();
                match kind.as_str() {
                    $( $wire => $crate::polymorphic::decode_variant::<$ty, D::Error>(map).map($name::$variant), )*
                    _ => Ok($name::Unknown($crate::polymorphic::UnknownObject::from_map(map, "object"))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_object_keeps_raw_fields() {
        let Value::Object(map) = json!({"id": "iauth_1", "object": "issuing.authorization", "amount": 5})
        else {
            panic!("not an object");
        };
        let unknown = UnknownObject::from_map(map, "object");
        assert_eq!(unknown.id(), "iauth_1");
        assert_eq!(unknown.object(), "issuing.authorization");
        assert_eq!(unknown.get("amount"), Some(&json!(5)));
        assert_eq!(
            serde_json::to_value(&unknown).unwrap(),
            json!({"id": "iauth_1", "object": "issuing.authorization", "amount": 5})
        );
    }

    #[derive(Debug, Clone, PartialEq, serde::Deserialize, Serialize)]
    struct Card {
        id: String,
        last4: String,
    }

    impl HasId for Card {
        fn id(&self) -> &str {
            &self.id
        }

        fn object(&self) -> &str {
            "card"
        }
    }

    #[derive(Debug, Clone, PartialEq, serde::Deserialize, Serialize)]
    struct BankAccount {
        id: String,
        bank_name: String,
    }

    impl HasId for BankAccount {
        fn id(&self) -> &str {
            &self.id
        }

        fn object(&self) -> &str {
            "bank_account"
        }
    }

    crate::object_union! {
        enum Destination {
            BankAccount(BankAccount) = "bank_account",
            Card(Card) = "card",
        }
    }

    #[test]
    fn test_union_picks_variant_by_object() {
        let dest: Destination =
            serde_json::from_str(r#"{"id":"card_1","object":"card","last4":"4242"}"#).unwrap();
        match &dest {
            Destination::Card(card) => assert_eq!(card.last4, "4242"),
            other => panic!("wrong variant: {other:?}"),
        }
        assert_eq!(dest.id(), "card_1");
        assert_eq!(dest.object(), "card");
        assert!(!dest.is_unknown());
    }

    #[test]
    fn test_union_unknown_kind_keeps_raw() {
        let raw = json!({"id":"fa_1","object":"financial_account","balance":7});
        let dest: Destination = serde_json::from_value(raw.clone()).unwrap();
        assert!(dest.is_unknown());
        assert_eq!(dest.object(), "financial_account");
        assert_eq!(dest.id(), "fa_1");
        assert_eq!(serde_json::to_value(&dest).unwrap(), raw);
    }

    #[test]
    fn test_union_malformed_variant_errors() {
        let result = serde_json::from_str::<Destination>(r#"{"id":"ba_1","object":"bank_account"}"#);
        assert!(result.is_err());
        assert!(serde_json::from_str::<Destination>("[]").is_err());
    }

    #[test]
    fn test_union_behind_expandable() {
        use crate::expandable::Expandable;

        let dest: Expandable<Destination> = serde_json::from_str(r#""ba_9""#).unwrap();
        assert_eq!(dest.id(), "ba_9");
        let dest: Expandable<Destination> =
            serde_json::from_str(r#"{"id":"ba_9","object":"bank_account","bank_name":"STRIPE TEST BANK"}"#)
                .unwrap();
        assert!(matches!(dest.as_object(), Some(Destination::BankAccount(_))));
    }

    #[test]
    fn test_unknown_object_as_expandable() {
        use crate::expandable::Expandable;

        let review: Expandable<UnknownObject> =
            serde_json::from_str(r#"{"id":"prv_1","object":"review","open":true}"#).unwrap();
        assert_eq!(review.id(), "prv_1");
        assert_eq!(review.as_object().unwrap().get("open"), Some(&json!(true)));

        let review: Expandable<UnknownObject> = serde_json::from_str(r#""prv_2""#).unwrap();
        assert_eq!(review.id(), "prv_2");
    }

    #[test]
    fn test_expect_object_rejects_scalars() {
        let err = expect_object::<serde_json::Error>(json!(12), "a charge object").unwrap_err();
        assert!(err.to_string().contains("a charge object"));
    }

    #[test]
    fn test_string_field_defaults_to_empty() {
        let Value::Object(map) = json!({"object": 3}) else {
            panic!("not an object");
        };
        assert_eq!(string_field(&map, "object"), "");
        assert_eq!(string_field(&map, "id"), "");
    }
}
