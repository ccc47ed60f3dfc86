//! # Form Encoding
//!
//! Serializes parameter structs into `application/x-www-form-urlencoded`
//! bodies using Stripe's bracketed key notation:
//!
//! ```text
//! amount=2000
//! shipping[address][city]=Berlin
//! items[0][price]=price_123
//! metadata[order_id]=6735
//! ```
//!
//! Encoding rules:
//! - `None` fields are left out entirely.
//! - `Some("")` is sent as `key=`, which clears the field server-side.
//! - An empty sequence or map under a key is sent as `key=` as well.
//! - Map keys keep their iteration order, so use `BTreeMap` for stable output.
//! - Floats are written with four decimal places.
//! - The value being encoded must be a struct or a map.

use std::fmt;

use serde::ser::{self, Serialize};
use thiserror::Error;

/// Errors raised while form encoding a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Scalars and sequences have no key to live under
    #[error("Top-level value must be a struct or map, got {0}")]
    TopLevel(&'static str),

    /// Map keys must render as strings
    #[error("Unsupported map key: {0}")]
    UnsupportedKey(String),

    #[error("{0}")]
    Custom(String),
}

impl ser::Error for FormError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FormError::Custom(msg.to_string())
    }
}

/// Ordered list of form pairs. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, keeping any existing pair with the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replaces the first pair with this key, or appends one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value.into(),
            None => self.pairs.push((key, value.into())),
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn extend(&mut self, other: FormValues) {
        self.pairs.extend(other.pairs);
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Renders the request body. Keys are escaped except for brackets.
    pub fn encode(&self) -> String {
        let mut body = String::new();
        for (key, value) in &self.pairs {
            if !body.is_empty() {
                body.push('&');
            }
            body.push_str(&escape_key(key));
            body.push('=');
            body.push_str(&escape(value));
        }
        body
    }
}

impl fmt::Display for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Joins key parts into bracket notation: `["a", "b", "0"]` -> `a[b][0]`.
pub fn format_key(parts: &[&str]) -> String {
    let mut key = String::new();
    for part in parts {
        key = nest(&key, part);
    }
    key
}

/// Encodes `value` into form pairs.
pub fn to_values<T: Serialize + ?Sized>(value: &T) -> Result<FormValues, FormError> {
    let mut out = FormValues::new();
    value.serialize(Encoder {
        out: &mut out,
        key: String::new(),
    })?;
    Ok(out)
}

/// Encodes `value` straight to a request body.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, FormError> {
    to_values(value).map(|values| values.encode())
}

fn nest(prefix: &str, part: &str) -> String {
    if prefix.is_empty() {
        part.to_owned()
    } else {
        format!("{prefix}[{part}]")
    }
}

// Query-style escaping: spaces become `+`.
fn escape(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

fn escape_key(s: &str) -> String {
    escape(s).replace("%5B", "[").replace("%5D", "]")
}

struct Encoder<'a> {
    out: &'a mut FormValues,
    key: String,
}

impl<'a> Encoder<'a> {
    fn push(self, value: String) -> Result<(), FormError> {
        if self.key.is_empty() {
            return Err(FormError::TopLevel("scalar"));
        }
        self.out.add(self.key, value);
        Ok(())
    }
}

impl<'a> ser::Serializer for Encoder<'a> {
    type Ok = ();
    type Error = FormError;

    type SerializeSeq = SeqEncoder<'a>;
    type SerializeTuple = SeqEncoder<'a>;
    type SerializeTupleStruct = SeqEncoder<'a>;
    type SerializeTupleVariant = SeqEncoder<'a>;
    type SerializeMap = MapEncoder<'a>;
    type SerializeStruct = StructEncoder<'a>;
    type SerializeStructVariant = StructEncoder<'a>;

    fn serialize_bool(self, v: bool) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<(), FormError> {
        self.push(format!("{v:.4}"))
    }

    fn serialize_f64(self, v: f64) -> Result<(), FormError> {
        self.push(format!("{v:.4}"))
    }

    fn serialize_char(self, v: char) -> Result<(), FormError> {
        self.push(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<(), FormError> {
        self.push(v.to_owned())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), FormError> {
        self.push(String::from_utf8_lossy(v).into_owned())
    }

    fn serialize_none(self) -> Result<(), FormError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), FormError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), FormError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), FormError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<(), FormError> {
        self.push(variant.to_owned())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), FormError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), FormError> {
        let key = nest(&self.key, variant);
        value.serialize(Encoder { out: self.out, key })
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SeqEncoder<'a>, FormError> {
        if self.key.is_empty() {
            return Err(FormError::TopLevel("sequence"));
        }
        Ok(SeqEncoder {
            out: self.out,
            key: self.key,
            index: 0,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqEncoder<'a>, FormError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a>, FormError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a>, FormError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapEncoder<'a>, FormError> {
        Ok(MapEncoder {
            out: self.out,
            key: self.key,
            pending: None,
            count: 0,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<StructEncoder<'a>, FormError> {
        Ok(StructEncoder {
            out: self.out,
            key: self.key,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<StructEncoder<'a>, FormError> {
        Ok(StructEncoder {
            out: self.out,
            key: self.key,
        })
    }
}

struct SeqEncoder<'a> {
    out: &'a mut FormValues,
    key: String,
    index: usize,
}

impl<'a> SeqEncoder<'a> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        let key = nest(&self.key, &self.index.to_string());
        self.index += 1;
        value.serialize(Encoder {
            out: &mut *self.out,
            key,
        })
    }

    fn finish(self) -> Result<(), FormError> {
        // An explicitly empty list clears the field
        if self.index == 0 {
            self.out.add(self.key, "");
        }
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for SeqEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FormError> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for SeqEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FormError> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for SeqEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FormError> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleVariant for SeqEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FormError> {
        self.finish()
    }
}

struct MapEncoder<'a> {
    out: &'a mut FormValues,
    key: String,
    pending: Option<String>,
    count: usize,
}

impl<'a> ser::SerializeMap for MapEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), FormError> {
        let rendered = match serde_json::to_value(key) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(serde_json::Value::Number(n)) => n.to_string(),
            Ok(serde_json::Value::Bool(b)) => b.to_string(),
            Ok(other) => return Err(FormError::UnsupportedKey(other.to_string())),
            Err(err) => return Err(FormError::UnsupportedKey(err.to_string())),
        };
        self.pending = Some(rendered);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FormError> {
        let part = self
            .pending
            .take()
            .ok_or_else(|| FormError::Custom("map value without a key".to_string()))?;
        self.count += 1;
        value.serialize(Encoder {
            out: &mut *self.out,
            key: nest(&self.key, &part),
        })
    }

    fn end(self) -> Result<(), FormError> {
        // An explicitly empty map clears the field
        if self.count == 0 && !self.key.is_empty() {
            self.out.add(self.key, "");
        }
        Ok(())
    }
}

struct StructEncoder<'a> {
    out: &'a mut FormValues,
    key: String,
}

impl<'a> StructEncoder<'a> {
    fn field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), FormError> {
        value.serialize(Encoder {
            out: &mut *self.out,
            key: nest(&self.key, name),
        })
    }
}

impl<'a> ser::SerializeStruct for StructEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FormError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FormError> {
        Ok(())
    }
}

impl<'a> ser::SerializeStructVariant for StructEncoder<'a> {
    type Ok = ();
    type Error = FormError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FormError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FormError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize, Default)]
    struct Address {
        #[serde(skip_serializing_if = "Option::is_none")]
        city: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        line1: Option<String>,
    }

    #[derive(Serialize)]
    struct Item {
        price: String,
        quantity: i64,
    }

    #[derive(Serialize, Default)]
    struct Create {
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        capture: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<Address>,
        #[serde(skip_serializing_if = "Option::is_none")]
        items: Option<Vec<Item>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<BTreeMap<String, String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exchange_rate: Option<f64>,
    }

    fn pairs(values: &FormValues) -> Vec<(&str, &str)> {
        values.iter().collect()
    }

    #[test]
    fn test_nested_keys_use_brackets() {
        let params = Create {
            amount: Some(2000),
            address: Some(Address {
                city: Some("Berlin".into()),
                line1: None,
            }),
            items: Some(vec![
                Item {
                    price: "price_1".into(),
                    quantity: 2,
                },
                Item {
                    price: "price_2".into(),
                    quantity: 1,
                },
            ]),
            ..Default::default()
        };

        let values = to_values(&params).unwrap();
        assert_eq!(
            pairs(&values),
            vec![
                ("amount", "2000"),
                ("address[city]", "Berlin"),
                ("items[0][price]", "price_1"),
                ("items[0][quantity]", "2"),
                ("items[1][price]", "price_2"),
                ("items[1][quantity]", "1"),
            ]
        );
    }

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let unset = to_values(&Create::default()).unwrap();
        assert!(unset.is_empty());

        let cleared = to_values(&Create {
            description: Some(String::new()),
            amount: Some(0),
            capture: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            pairs(&cleared),
            vec![("amount", "0"), ("description", ""), ("capture", "false")]
        );
        assert_eq!(cleared.encode(), "amount=0&description=&capture=false");
    }

    #[test]
    fn test_metadata_sorted_and_clearable() {
        let mut metadata = BTreeMap::new();
        metadata.insert("zeta".to_string(), "1".to_string());
        metadata.insert("alpha".to_string(), String::new());
        let values = to_values(&Create {
            metadata: Some(metadata),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            pairs(&values),
            vec![("metadata[alpha]", ""), ("metadata[zeta]", "1")]
        );

        let cleared = to_values(&Create {
            metadata: Some(BTreeMap::new()),
            items: Some(Vec::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(pairs(&cleared), vec![("items", ""), ("metadata", "")]);
    }

    #[test]
    fn test_float_uses_four_decimals() {
        let values = to_values(&Create {
            exchange_rate: Some(0.5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(values.get("exchange_rate"), Some("0.5000"));
    }

    #[test]
    fn test_top_level_must_be_keyed() {
        assert_eq!(to_values(&42), Err(FormError::TopLevel("scalar")));
        assert_eq!(
            to_values(&vec![1, 2]),
            Err(FormError::TopLevel("sequence"))
        );
    }

    #[test]
    fn test_flattened_struct_shares_prefix() {
        #[derive(Serialize)]
        struct Common {
            expand: Vec<String>,
        }

        #[derive(Serialize)]
        struct Outer {
            #[serde(flatten)]
            common: Common,
            limit: i64,
        }

        let values = to_values(&Outer {
            common: Common {
                expand: vec!["data.customer".into()],
            },
            limit: 3,
        })
        .unwrap();
        assert_eq!(
            pairs(&values),
            vec![("expand[0]", "data.customer"), ("limit", "3")]
        );
    }

    #[test]
    fn test_encode_escapes_values_but_not_brackets() {
        let mut values = FormValues::new();
        values.add("shipping[name]", "Jane Doe");
        values.add("description", "a&b=c");
        values.add("email", "jane+1@example.com");
        assert_eq!(
            values.encode(),
            "shipping[name]=Jane+Doe&description=a%26b%3Dc&email=jane%2B1%40example.com"
        );
    }

    #[test]
    fn test_set_replaces_first_and_add_duplicates() {
        let mut values = FormValues::new();
        values.add("expand[]", "a");
        values.add("expand[]", "b");
        assert_eq!(values.get_all("expand[]"), vec!["a", "b"]);

        values.set("expand[]", "c");
        assert_eq!(values.get_all("expand[]"), vec!["c", "b"]);

        values.set("limit", "10");
        assert_eq!(values.get("limit"), Some("10"));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(&["a"]), "a");
        assert_eq!(format_key(&["a", "b", "0"]), "a[b][0]");
    }
}
