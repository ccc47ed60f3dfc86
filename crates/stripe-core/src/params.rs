//! # Request Parameters
//!
//! Shared pieces embedded (via `#[serde(flatten)]`) in every operation's
//! parameter struct: expansion, extra keys, list cursors and filters.
//! Header-only values (idempotency key, connected account) are carried
//! here but never written to the form body.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Common parameters for single-object operations.
///
/// Embedded with `#[serde(flatten)]`. Serializes as `expand[n]` followed by
/// the extra keys; the two header values are never written to the body.
/// When read back from JSON, extra keys come from an explicit `extra`
/// object so that sibling flattened fields keep their own keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    /// Response fields to expand, e.g. `customer` or `data.source`.
    pub expand: Vec<String>,

    /// Keys not modelled by the typed struct.
    pub extra: ExtraValues,

    /// Sent as the `Idempotency-Key` header.
    pub idempotency_key: Option<String>,

    /// Sent as the `Stripe-Account` header.
    pub stripe_account: Option<String>,
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.expand.is_empty() {
            map.serialize_entry("expand", &self.expand)?;
        }
        for (key, value) in self.extra.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ParamsRepr {
    expand: Vec<String>,
    extra: ExtraValues,
    idempotency_key: Option<String>,
    stripe_account: Option<String>,
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ParamsRepr::deserialize(deserializer)?;
        Ok(Self {
            expand: repr.expand,
            extra: repr.extra,
            idempotency_key: repr.idempotency_key,
            stripe_account: repr.stripe_account,
        })
    }
}

impl Params {
    pub fn add_expand(&mut self, field: impl Into<String>) {
        self.expand.push(field.into());
    }

    pub fn add_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.add(key, value);
    }

    pub fn set_idempotency_key(&mut self, key: impl Into<String>) {
        self.idempotency_key = Some(key.into());
    }

    /// Generates a random (v4) idempotency key and stores it.
    pub fn new_idempotency_key(&mut self) -> &str {
        self.idempotency_key
            .insert(uuid::Uuid::new_v4().to_string())
            .as_str()
    }

    pub fn set_stripe_account(&mut self, account: impl Into<String>) {
        self.stripe_account = Some(account.into());
    }

    /// Header-only values for the transport.
    pub fn headers(&self) -> RequestHeaders {
        RequestHeaders {
            idempotency_key: self.idempotency_key.clone(),
            stripe_account: self.stripe_account.clone(),
        }
    }
}

/// Header values that travel alongside a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    pub idempotency_key: Option<String>,
    pub stripe_account: Option<String>,
}

impl RequestHeaders {
    /// `(header name, value)` pairs for the headers that are set.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(key) = &self.idempotency_key {
            pairs.push(("Idempotency-Key", key.as_str()));
        }
        if let Some(account) = &self.stripe_account {
            pairs.push(("Stripe-Account", account.as_str()));
        }
        pairs
    }
}

/// Arbitrary extra keys. Each value is sent as its own pair, so a key with
/// two values appears twice in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraValues {
    values: BTreeMap<String, Vec<String>>,
}

impl ExtraValues {
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every `(key, value)` pair in body order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ExtraValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtraValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut extra = ExtraValues::default();
        for (key, value) in raw {
            match value {
                Value::Array(items) => {
                    for item in &items {
                        extra.add(key.clone(), scalar_string(item));
                    }
                }
                other => extra.add(key, scalar_string(&other)),
            }
        }
        Ok(extra)
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Common parameters for list operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Cursor: return objects before this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    /// Cursor: return objects after this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Page size, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    #[serde(flatten)]
    pub filters: Filters,

    #[serde(skip_serializing)]
    pub stripe_account: Option<String>,
}

impl ListParams {
    pub fn add_expand(&mut self, field: impl Into<String>) {
        self.expand.push(field.into());
    }

    /// Continues a listing after `id`.
    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.ending_before = None;
        self.starting_after = Some(id.into());
        self
    }

    pub fn headers(&self) -> RequestHeaders {
        RequestHeaders {
            idempotency_key: None,
            stripe_account: self.stripe_account.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Filter {
    key: String,
    op: String,
    value: String,
}

/// Free-form list filters: `key[op]=value`, or `key=value` without an op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    filters: Vec<Filter>,
}

impl Filters {
    pub fn add_filter(&mut self, key: impl Into<String>, op: impl Into<String>, value: impl Into<String>) {
        self.filters.push(Filter {
            key: key.into(),
            op: op.into(),
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Serialize for Filters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.filters.len()))?;
        for filter in &self.filters {
            if filter.op.is_empty() {
                map.serialize_entry(&filter.key, &filter.value)?;
            } else {
                let key = format!("{}[{}]", filter.key, filter.op);
                map.serialize_entry(&key, &filter.value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Filters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut filters = Filters::default();
        for (key, value) in raw {
            match value {
                // {"created": {"gte": 10}} -> created[gte]=10
                Value::Object(ops) => {
                    for (op, v) in ops {
                        filters.add_filter(key.clone(), op, scalar_string(&v));
                    }
                }
                other => filters.add_filter(key, "", scalar_string(&other)),
            }
        }
        Ok(filters)
    }
}

/// Bounds for a range filter such as `created[gte]`.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeQuery {
    pub gt: Option<i64>,
    pub gte: Option<i64>,
    pub lt: Option<i64>,
    pub lte: Option<i64>,
}

/// A filter that is either an exact value or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeOrValue {
    Exact(i64),
    Range(RangeQuery),
}

impl RangeOrValue {
    pub fn gte(value: i64) -> Self {
        RangeOrValue::Range(RangeQuery {
            gte: Some(value),
            ..Default::default()
        })
    }

    pub fn lt(value: i64) -> Self {
        RangeOrValue::Range(RangeQuery {
            lt: Some(value),
            ..Default::default()
        })
    }

    /// Half-open window `[from, to)`.
    pub fn between(from: i64, to: i64) -> Self {
        RangeOrValue::Range(RangeQuery {
            gte: Some(from),
            lt: Some(to),
            ..Default::default()
        })
    }
}

impl From<i64> for RangeOrValue {
    fn from(value: i64) -> Self {
        RangeOrValue::Exact(value)
    }
}

/// Parameters for `/search` endpoints.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Search query, e.g. `status:'succeeded' AND metadata['order']:'6735'`.
    pub query: String,
    pub limit: Option<i64>,
    /// Cursor from a previous result's `next_page`.
    pub page: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form;
    use pretty_assertions::assert_eq;

    #[skip_serializing_none]
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct ThingListParams {
        #[serde(flatten)]
        list: ListParams,
        created: Option<RangeOrValue>,
        customer: Option<String>,
    }

    #[skip_serializing_none]
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct ThingParams {
        #[serde(flatten)]
        params: Params,
        amount: Option<i64>,
    }

    fn pairs(body: &impl Serialize) -> Vec<(String, String)> {
        form::to_values(body).unwrap().into_pairs()
    }

    fn p(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_headers_never_reach_the_body() {
        let mut params = ThingParams::default();
        params.params.set_idempotency_key("idem-1");
        params.params.set_stripe_account("acct_1");
        params.params.add_expand("customer");
        params.amount = Some(100);

        assert_eq!(
            pairs(&params),
            vec![p("expand[0]", "customer"), p("amount", "100")]
        );
        let headers = params.params.headers();
        assert_eq!(
            headers.pairs(),
            vec![("Idempotency-Key", "idem-1"), ("Stripe-Account", "acct_1")]
        );
    }

    #[test]
    fn test_generated_idempotency_key_is_uuid() {
        let mut params = Params::default();
        let key = params.new_idempotency_key().to_string();
        assert_eq!(key.len(), 36);
        assert!(uuid::Uuid::parse_str(&key).is_ok());
        assert_eq!(params.idempotency_key.as_deref(), Some(key.as_str()));
    }

    #[test]
    fn test_extra_values_repeat_keys() {
        let mut params = ThingParams::default();
        params.params.add_extra("tag", "a");
        params.params.add_extra("tag", "b");
        assert_eq!(pairs(&params), vec![p("tag", "a"), p("tag", "b")]);
        assert_eq!(params.params.extra.get("tag"), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_params_from_json() {
        let params: ThingParams = serde_json::from_str(
            r#"{"amount": 5, "expand": ["customer"], "idempotency_key": "k1", "extra": {"tag": ["a", "b"]}, "ignored": 1}"#,
        )
        .unwrap();
        assert_eq!(params.amount, Some(5));
        assert_eq!(params.params.idempotency_key.as_deref(), Some("k1"));
        assert_eq!(
            pairs(&params),
            vec![
                p("expand[0]", "customer"),
                p("tag", "a"),
                p("tag", "b"),
                p("amount", "5"),
            ]
        );
    }

    #[test]
    fn test_list_params_with_range_and_filters() {
        let mut params = ThingListParams {
            created: Some(RangeOrValue::between(100, 200)),
            ..Default::default()
        };
        params.list.limit = Some(3);
        params.list.filters.add_filter("amount", "gt", "500");
        params.list.filters.add_filter("currency", "", "usd");
        params.list = params.list.after("obj_9");

        assert_eq!(
            pairs(&params),
            vec![
                p("starting_after", "obj_9"),
                p("limit", "3"),
                p("amount[gt]", "500"),
                p("currency", "usd"),
                p("created[gte]", "100"),
                p("created[lt]", "200"),
            ]
        );
    }

    #[test]
    fn test_exact_created_filter() {
        let params = ThingListParams {
            created: Some(1_700_000_000.into()),
            ..Default::default()
        };
        assert_eq!(pairs(&params), vec![p("created", "1700000000")]);
    }

    #[test]
    fn test_list_params_from_json() {
        let params: ThingListParams = serde_json::from_str(
            r#"{"limit": 2, "customer": "cus_1", "created": {"gte": 5}, "status": "paid"}"#,
        )
        .unwrap();
        assert_eq!(params.list.limit, Some(2));
        assert_eq!(params.customer.as_deref(), Some("cus_1"));
        assert_eq!(params.created, Some(RangeOrValue::gte(5)));
        assert_eq!(
            pairs(&params),
            vec![
                p("limit", "2"),
                p("status", "paid"),
                p("created[gte]", "5"),
                p("customer", "cus_1"),
            ]
        );
    }

    #[test]
    fn test_search_params() {
        let mut params = SearchParams::new("status:'succeeded'");
        params.limit = Some(10);
        assert_eq!(
            pairs(&params),
            vec![p("query", "status:'succeeded'"), p("limit", "10")]
        );
    }
}
