//! # Issuing
//!
//! Compact models of the Issuing objects that show up as balance
//! transaction sources. The headline fields are typed; card, cardholder,
//! merchant and network blocks stay raw in `unmodelled` and re-encode
//! unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stripe_core::{open_enum, Currency, HasId};

use crate::shared::Metadata;

open_enum! {
    pub struct IssuingAuthorizationStatus {
        CLOSED = "closed",
        PENDING = "pending",
        REVERSED = "reversed",
    }
}

open_enum! {
    pub struct IssuingDisputeStatus {
        EXPIRED = "expired",
        LOST = "lost",
        SUBMITTED = "submitted",
        UNSUBMITTED = "unsubmitted",
        WON = "won",
    }
}

open_enum! {
    pub struct IssuingTransactionType {
        CAPTURE = "capture",
        REFUND = "refund",
    }
}

/// A card authorization request and its outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingAuthorization {
    pub id: String,
    pub object: String,
    /// Amount held on the balance, in minor units.
    pub amount: i64,
    pub approved: bool,
    pub authorization_method: String,
    pub created: i64,
    pub currency: Currency,
    pub livemode: bool,
    /// Amount in the merchant's currency.
    pub merchant_amount: i64,
    pub merchant_currency: Currency,
    pub metadata: Option<Metadata>,
    pub status: IssuingAuthorizationStatus,
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl HasId for IssuingAuthorization {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// A dispute raised by a cardholder against an issuing transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingDispute {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub created: i64,
    pub currency: Currency,
    pub livemode: bool,
    pub loss_reason: Option<String>,
    pub metadata: Option<Metadata>,
    pub status: IssuingDisputeStatus,
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl HasId for IssuingDispute {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// A capture or refund settled against an issued card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingTransaction {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub created: i64,
    pub currency: Currency,
    pub livemode: bool,
    pub merchant_amount: i64,
    pub merchant_currency: Currency,
    pub metadata: Option<Metadata>,
    #[serde(rename = "type")]
    pub type_: IssuingTransactionType,
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl IssuingTransaction {
    /// Id of the authorization this transaction settled, expanded or not.
    pub fn authorization_id(&self) -> Option<&str> {
        match self.unmodelled.get("authorization")? {
            Value::String(id) => Some(id),
            Value::Object(map) => map.get("id")?.as_str(),
            _ => None,
        }
    }
}

impl HasId for IssuingTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}
