//! # Payouts
//!
//! Funds sent from a Stripe balance to a bank account or debit card.
//! `destination` is either an id or the expanded [`PayoutDestination`].

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{
    object_union, open_enum, Currency, Expandable, HasId, ListParams, Params, RangeOrValue,
};

use crate::balance_transaction::BalanceTransaction;
use crate::fees::ApplicationFee;
use crate::payment_source::{BankAccount, Card};
use crate::shared::Metadata;

open_enum! {
    pub struct PayoutFailureCode {
        ACCOUNT_CLOSED = "account_closed",
        ACCOUNT_FROZEN = "account_frozen",
        BANK_ACCOUNT_RESTRICTED = "bank_account_restricted",
        BANK_OWNERSHIP_CHANGED = "bank_ownership_changed",
        COULD_NOT_PROCESS = "could_not_process",
        DEBIT_NOT_AUTHORIZED = "debit_not_authorized",
        DECLINED = "declined",
        INCORRECT_ACCOUNT_HOLDER_ADDRESS = "incorrect_account_holder_address",
        INCORRECT_ACCOUNT_HOLDER_NAME = "incorrect_account_holder_name",
        INCORRECT_ACCOUNT_HOLDER_TAX_ID = "incorrect_account_holder_tax_id",
        INSUFFICIENT_FUNDS = "insufficient_funds",
        INVALID_ACCOUNT_NUMBER = "invalid_account_number",
        INVALID_CURRENCY = "invalid_currency",
        NO_ACCOUNT = "no_account",
        UNSUPPORTED_CARD = "unsupported_card",
    }
}

open_enum! {
    pub struct PayoutMethod {
        INSTANT = "instant",
        STANDARD = "standard",
    }
}

open_enum! {
    pub struct PayoutReconciliationStatus {
        COMPLETED = "completed",
        IN_PROGRESS = "in_progress",
        NOT_APPLICABLE = "not_applicable",
    }
}

open_enum! {
    pub struct PayoutSourceType {
        BANK_ACCOUNT = "bank_account",
        CARD = "card",
        FPX = "fpx",
    }
}

open_enum! {
    pub struct PayoutStatus {
        CANCELED = "canceled",
        FAILED = "failed",
        IN_TRANSIT = "in_transit",
        PAID = "paid",
        PENDING = "pending",
    }
}

open_enum! {
    pub struct PayoutType {
        BANK_ACCOUNT = "bank_account",
        CARD = "card",
    }
}

object_union! {
    /// Where a payout lands.
    pub enum PayoutDestination {
        BankAccount(BankAccount) = "bank_account",
        Card(Card) = "card",
    }
}

impl PayoutDestination {
    pub fn as_bank_account(&self) -> Option<&BankAccount> {
        match self {
            PayoutDestination::BankAccount(account) => Some(account.as_ref()),
            _ => None,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            PayoutDestination::Card(card) => Some(card.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutTraceId {
    /// `pending`, `supported` or `unsupported`.
    pub status: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payout {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub application_fee: Option<Expandable<ApplicationFee>>,
    pub application_fee_amount: Option<i64>,
    pub arrival_date: i64,
    pub automatic: bool,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub created: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub destination: Option<Expandable<PayoutDestination>>,
    pub failure_balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub failure_code: Option<PayoutFailureCode>,
    pub failure_message: Option<String>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub method: Option<PayoutMethod>,
    pub original_payout: Option<Expandable<Payout>>,
    pub reconciliation_status: Option<PayoutReconciliationStatus>,
    pub reversed_by: Option<Expandable<Payout>>,
    pub source_type: Option<PayoutSourceType>,
    pub statement_descriptor: Option<String>,
    pub status: PayoutStatus,
    pub trace_id: Option<PayoutTraceId>,
    #[serde(rename = "type")]
    pub type_: Option<PayoutType>,
}

impl Payout {
    pub fn arrival_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.arrival_date)
    }
}

impl HasId for Payout {
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
pub struct PayoutParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub metadata: Option<Metadata>,
    pub method: Option<PayoutMethod>,
    pub source_type: Option<PayoutSourceType>,
    pub statement_descriptor: Option<String>,
}

/// Reverse a payout that has not yet arrived.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutReverseParams {
    #[serde(flatten)]
    pub params: Params,
    pub metadata: Option<Metadata>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub arrival_date: Option<RangeOrValue>,
    pub created: Option<RangeOrValue>,
    pub destination: Option<String>,
    pub status: Option<PayoutStatus>,
}
