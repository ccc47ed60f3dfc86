//! # Customers
//!
//! The customer object, reduced to the fields the payment resources in this
//! crate reference, and its create/update/list parameters. Movements of a
//! customer's cash balance are [`CustomerCashBalanceTransaction`]s.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, Expandable, HasId, List, ListParams, Params, RangeOrValue};

use crate::payment_source::{PaymentSource, SourceParams};
use crate::shared::{Address, AddressParams, Metadata, ShippingDetails, ShippingDetailsParams};

open_enum! {
    pub struct CustomerTaxExempt {
        EXEMPT = "exempt",
        NONE = "none",
        REVERSE = "reverse",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub object: String,
    pub address: Option<Address>,
    /// Credit (negative) or debt (positive) applied to the next invoice.
    pub balance: Option<i64>,
    pub created: Option<i64>,
    pub currency: Option<Currency>,
    pub default_source: Option<Expandable<PaymentSource>>,
    pub deleted: Option<bool>,
    pub delinquent: Option<bool>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub invoice_prefix: Option<String>,
    pub livemode: Option<bool>,
    pub metadata: Option<Metadata>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub preferred_locales: Option<Vec<String>>,
    pub shipping: Option<ShippingDetails>,
    pub sources: Option<List<PaymentSource>>,
    pub tax_exempt: Option<CustomerTaxExempt>,
}

impl HasId for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

open_enum! {
    pub struct CustomerCashBalanceTransactionType {
        ADJUSTED_FOR_OVERDRAFT = "adjusted_for_overdraft",
        APPLIED_TO_PAYMENT = "applied_to_payment",
        FUNDED = "funded",
        FUNDING_REVERSED = "funding_reversed",
        REFUNDED_FROM_PAYMENT = "refunded_from_payment",
        RETURN_CANCELED = "return_canceled",
        RETURN_INITIATED = "return_initiated",
        TRANSFERRED_TO_BALANCE = "transferred_to_balance",
        UNAPPLIED_FROM_PAYMENT = "unapplied_from_payment",
    }
}

/// A movement of funds in or out of a customer's cash balance.
///
/// The per-type detail block (`funded`, `applied_to_payment`, ...) is kept
/// raw in `unmodelled`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerCashBalanceTransaction {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    /// Cash balance after this transaction, in minor units.
    pub ending_balance: i64,
    pub livemode: bool,
    /// Signed change to the cash balance.
    pub net_amount: i64,
    #[serde(rename = "type")]
    pub type_: CustomerCashBalanceTransactionType,
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl CustomerCashBalanceTransaction {
    /// The detail block named by `type`, if present.
    pub fn details(&self) -> Option<&Value> {
        self.unmodelled.get(self.type_.as_str())
    }
}

impl HasId for CustomerCashBalanceTransaction {
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
pub struct CustomerParams {
    #[serde(flatten)]
    pub params: Params,
    pub address: Option<AddressParams>,
    pub balance: Option<i64>,
    pub default_source: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub metadata: Option<Metadata>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub preferred_locales: Option<Vec<String>>,
    pub shipping: Option<ShippingDetailsParams>,
    #[serde(flatten)]
    pub source: Option<SourceParams>,
    pub tax_exempt: Option<CustomerTaxExempt>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub created: Option<RangeOrValue>,
    pub email: Option<String>,
    pub test_clock: Option<String>,
}
