//! # Top-ups
//!
//! Funds added to a Stripe balance from a bank source.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, Expandable, HasId, ListParams, Params, RangeOrValue};

use crate::balance_transaction::BalanceTransaction;
use crate::payment_source::PaymentSource;
use crate::shared::Metadata;

open_enum! {
    pub struct TopupStatus {
        CANCELED = "canceled",
        FAILED = "failed",
        PENDING = "pending",
        REVERSED = "reversed",
        SUCCEEDED = "succeeded",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topup {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub arrival_date: Option<i64>,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub created: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub expected_availability_date: Option<i64>,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub source: Option<PaymentSource>,
    pub statement_descriptor: Option<String>,
    pub status: TopupStatus,
    pub transfer_group: Option<String>,
}

impl HasId for Topup {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopupParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub metadata: Option<Metadata>,
    pub source: Option<String>,
    pub statement_descriptor: Option<String>,
    pub transfer_group: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopupListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub amount: Option<RangeOrValue>,
    pub created: Option<RangeOrValue>,
    pub status: Option<TopupStatus>,
}
