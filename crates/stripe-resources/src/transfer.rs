//! # Transfers
//!
//! Movements of funds from the platform balance to a connected account, and
//! their reversals.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, Expandable, HasId, List, ListParams, Params, RangeOrValue};

use crate::balance_transaction::BalanceTransaction;
use crate::charge::Charge;
use crate::payment_source::Account;
use crate::refund::Refund;
use crate::shared::Metadata;

open_enum! {
    /// Balance the funds are drawn from.
    pub struct TransferSourceType {
        BANK_ACCOUNT = "bank_account",
        CARD = "card",
        FPX = "fpx",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub amount_reversed: i64,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub created: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub destination: Option<Expandable<Account>>,
    pub destination_payment: Option<Expandable<Charge>>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub reversals: Option<List<TransferReversal>>,
    pub reversed: bool,
    pub source_transaction: Option<Expandable<Charge>>,
    pub source_type: Option<TransferSourceType>,
    pub transfer_group: Option<String>,
}

impl Transfer {
    /// Amount not yet reversed.
    pub fn outstanding(&self) -> i64 {
        self.amount - self.amount_reversed
    }
}

impl HasId for Transfer {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferReversal {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub created: i64,
    pub currency: Currency,
    pub destination_payment_refund: Option<Expandable<Refund>>,
    pub metadata: Option<Metadata>,
    pub source_refund: Option<Expandable<Refund>>,
    pub transfer: Option<Expandable<Transfer>>,
}

impl HasId for TransferReversal {
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
pub struct TransferParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub metadata: Option<Metadata>,
    pub source_transaction: Option<String>,
    pub source_type: Option<TransferSourceType>,
    pub transfer_group: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub created: Option<RangeOrValue>,
    pub destination: Option<String>,
    pub transfer_group: Option<String>,
}

/// Reverse (part of) a transfer. The transfer id travels in the path.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferReversalParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub description: Option<String>,
    pub metadata: Option<Metadata>,
    pub refund_application_fee: Option<bool>,
}
