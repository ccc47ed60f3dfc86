//! # Events
//!
//! Event envelopes as delivered by the events API and webhook endpoints.
//! The object inside `data` can be any resource, so it is kept as raw JSON
//! and decoded on demand with [`EventData::decode_object`].
//!
//! Path lookups walk maps by key and arrays by decimal index:
//!
//! ```rust,ignore
//! let last4 = event.object_value(&["payment_method_details", "card", "last4"]);
//! let old_status = event.previous_value(&["status"]);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use stripe_core::codec::body_sample;
use stripe_core::{open_enum, HasId, ListParams, RangeOrValue, WireError, WireResult};

open_enum! {
    /// Event kinds for the resources this crate models.
    pub struct EventType {
        ACCOUNT_EXTERNAL_ACCOUNT_CREATED = "account.external_account.created",
        ACCOUNT_EXTERNAL_ACCOUNT_DELETED = "account.external_account.deleted",
        ACCOUNT_EXTERNAL_ACCOUNT_UPDATED = "account.external_account.updated",
        ACCOUNT_UPDATED = "account.updated",
        APPLICATION_FEE_CREATED = "application_fee.created",
        APPLICATION_FEE_REFUND_UPDATED = "application_fee.refund.updated",
        APPLICATION_FEE_REFUNDED = "application_fee.refunded",
        BALANCE_AVAILABLE = "balance.available",
        CHARGE_CAPTURED = "charge.captured",
        CHARGE_DISPUTE_CLOSED = "charge.dispute.closed",
        CHARGE_DISPUTE_CREATED = "charge.dispute.created",
        CHARGE_DISPUTE_FUNDS_REINSTATED = "charge.dispute.funds_reinstated",
        CHARGE_DISPUTE_FUNDS_WITHDRAWN = "charge.dispute.funds_withdrawn",
        CHARGE_DISPUTE_UPDATED = "charge.dispute.updated",
        CHARGE_EXPIRED = "charge.expired",
        CHARGE_FAILED = "charge.failed",
        CHARGE_PENDING = "charge.pending",
        CHARGE_REFUND_UPDATED = "charge.refund.updated",
        CHARGE_REFUNDED = "charge.refunded",
        CHARGE_SUCCEEDED = "charge.succeeded",
        CHARGE_UPDATED = "charge.updated",
        CUSTOMER_CREATED = "customer.created",
        CUSTOMER_DELETED = "customer.deleted",
        CUSTOMER_SOURCE_CREATED = "customer.source.created",
        CUSTOMER_SOURCE_DELETED = "customer.source.deleted",
        CUSTOMER_SOURCE_EXPIRING = "customer.source.expiring",
        CUSTOMER_SOURCE_UPDATED = "customer.source.updated",
        CUSTOMER_UPDATED = "customer.updated",
        PAYMENT_INTENT_AMOUNT_CAPTURABLE_UPDATED = "payment_intent.amount_capturable_updated",
        PAYMENT_INTENT_CANCELED = "payment_intent.canceled",
        PAYMENT_INTENT_CREATED = "payment_intent.created",
        PAYMENT_INTENT_PAYMENT_FAILED = "payment_intent.payment_failed",
        PAYMENT_INTENT_PROCESSING = "payment_intent.processing",
        PAYMENT_INTENT_REQUIRES_ACTION = "payment_intent.requires_action",
        PAYMENT_INTENT_SUCCEEDED = "payment_intent.succeeded",
        PAYOUT_CANCELED = "payout.canceled",
        PAYOUT_CREATED = "payout.created",
        PAYOUT_FAILED = "payout.failed",
        PAYOUT_PAID = "payout.paid",
        PAYOUT_RECONCILIATION_COMPLETED = "payout.reconciliation_completed",
        PAYOUT_UPDATED = "payout.updated",
        REFUND_CREATED = "refund.created",
        REFUND_FAILED = "refund.failed",
        REFUND_UPDATED = "refund.updated",
        SOURCE_CANCELED = "source.canceled",
        SOURCE_CHARGEABLE = "source.chargeable",
        SOURCE_FAILED = "source.failed",
        SOURCE_MANDATE_NOTIFICATION = "source.mandate_notification",
        SOURCE_REFUND_ATTRIBUTES_REQUIRED = "source.refund_attributes_required",
        SOURCE_TRANSACTION_CREATED = "source.transaction.created",
        SOURCE_TRANSACTION_UPDATED = "source.transaction.updated",
        TAX_SETTINGS_UPDATED = "tax.settings.updated",
        TOPUP_CANCELED = "topup.canceled",
        TOPUP_CREATED = "topup.created",
        TOPUP_FAILED = "topup.failed",
        TOPUP_REVERSED = "topup.reversed",
        TOPUP_SUCCEEDED = "topup.succeeded",
        TRANSFER_CREATED = "transfer.created",
        TRANSFER_REVERSED = "transfer.reversed",
        TRANSFER_UPDATED = "transfer.updated",
    }
}

impl EventType {
    /// Resource family, the part before the first dot (`charge` for
    /// `charge.dispute.created`).
    pub fn resource(&self) -> &str {
        let name = self.as_str();
        name.split_once('.').map_or(name, |(head, _)| head)
    }
}

/// Where the request that caused the event came from. Both fields are
/// empty for automatic events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRequest {
    pub id: Option<String>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventData {
    /// The resource as it was when the event fired.
    pub object: Map<String, Value>,
    /// Old values of the fields an `*.updated` event changed.
    pub previous_attributes: Option<Map<String, Value>>,
}

impl EventData {
    /// Decodes the embedded object into a concrete resource type.
    pub fn decode_object<T: DeserializeOwned>(&self) -> WireResult<T> {
        T::deserialize(Value::Object(self.object.clone())).map_err(|source| WireError::Decode {
            target: std::any::type_name::<T>(),
            sample: body_sample(Value::Object(self.object.clone()).to_string().as_bytes()),
            source,
        })
    }

    /// The `object` discriminator of the embedded resource.
    pub fn object_kind(&self) -> Option<&str> {
        self.object.get("object").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: String,
    pub object: String,
    /// Connected account the event belongs to, if any.
    pub account: Option<String>,
    pub api_version: Option<String>,
    pub created: i64,
    pub data: Option<EventData>,
    pub livemode: bool,
    pub pending_webhooks: i64,
    pub request: Option<EventRequest>,
    #[serde(rename = "type")]
    pub type_: EventType,
}

impl Event {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.created)
    }

    /// Value at `path` inside `data.object`, rendered as a string.
    ///
    /// Returns `None` when the path does not resolve or ends at `null`.
    pub fn object_value(&self, path: &[&str]) -> Option<String> {
        let data = self.data.as_ref()?;
        lookup(&data.object, path)
    }

    /// Value at `path` inside `data.previous_attributes`.
    pub fn previous_value(&self, path: &[&str]) -> Option<String> {
        let previous = self.data.as_ref()?.previous_attributes.as_ref()?;
        lookup(previous, path)
    }
}

impl HasId for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

fn lookup(root: &Map<String, Value>, path: &[&str]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    let mut node = root.get(*first)?;
    for key in rest {
        node = match node {
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(*key)?,
            _ => return None,
        };
    }
    match node {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub created: Option<RangeOrValue>,
    pub delivery_success: Option<bool>,
    /// A single event name, `*` wildcards allowed (`charge.*`).
    #[serde(rename = "type")]
    pub type_: Option<String>,
    /// Up to 20 exact event names; mutually exclusive with `type`.
    pub types: Option<Vec<EventType>>,
}
