//! # Balance Transactions
//!
//! Every movement of funds through a Stripe balance. The `source` field
//! names the object that caused the movement and may be any of several
//! resource kinds; see [`BalanceTransactionSource`].

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{object_union, open_enum, Currency, Expandable, HasId, ListParams, Params, RangeOrValue};

use crate::charge::Charge;
use crate::customer::CustomerCashBalanceTransaction;
use crate::dispute::Dispute;
use crate::fees::{ApplicationFee, FeeRefund};
use crate::issuing::{IssuingAuthorization, IssuingDispute, IssuingTransaction};
use crate::payment_source::Account;
use crate::payout::Payout;
use crate::refund::Refund;
use crate::topup::Topup;
use crate::transfer::{Transfer, TransferReversal};

open_enum! {
    pub struct BalanceTransactionReportingCategory {
        ADVANCE = "advance",
        ADVANCE_FUNDING = "advance_funding",
        CHARGE = "charge",
        CHARGE_FAILURE = "charge_failure",
        CONNECT_COLLECTION_TRANSFER = "connect_collection_transfer",
        CONNECT_RESERVED_FUNDS = "connect_reserved_funds",
        DISPUTE = "dispute",
        DISPUTE_REVERSAL = "dispute_reversal",
        FEE = "fee",
        ISSUING_AUTHORIZATION_HOLD = "issuing_authorization_hold",
        ISSUING_AUTHORIZATION_RELEASE = "issuing_authorization_release",
        ISSUING_TRANSACTION = "issuing_transaction",
        OTHER_ADJUSTMENT = "other_adjustment",
        PARTIAL_CAPTURE_REVERSAL = "partial_capture_reversal",
        PAYOUT = "payout",
        PAYOUT_REVERSAL = "payout_reversal",
        PLATFORM_EARNING = "platform_earning",
        PLATFORM_EARNING_REFUND = "platform_earning_refund",
        REFUND = "refund",
        REFUND_FAILURE = "refund_failure",
        RISK_RESERVED_FUNDS = "risk_reserved_funds",
        TAX = "tax",
        TOPUP = "topup",
        TOPUP_REVERSAL = "topup_reversal",
        TRANSFER = "transfer",
        TRANSFER_REVERSAL = "transfer_reversal",
    }
}

open_enum! {
    /// Every `object` value a balance transaction source can carry,
    /// including kinds without a typed variant.
    pub struct BalanceTransactionSourceType {
        APPLICATION_FEE = "application_fee",
        CHARGE = "charge",
        CONNECT_COLLECTION_TRANSFER = "connect_collection_transfer",
        CUSTOMER_CASH_BALANCE_TRANSACTION = "customer_cash_balance_transaction",
        DISPUTE = "dispute",
        FEE_REFUND = "fee_refund",
        ISSUING_AUTHORIZATION = "issuing.authorization",
        ISSUING_DISPUTE = "issuing.dispute",
        ISSUING_TRANSACTION = "issuing.transaction",
        PAYOUT = "payout",
        REFUND = "refund",
        RESERVE_TRANSACTION = "reserve_transaction",
        TAX_DEDUCTED_AT_SOURCE = "tax_deducted_at_source",
        TOPUP = "topup",
        TRANSFER = "transfer",
        TRANSFER_REVERSAL = "transfer_reversal",
    }
}

open_enum! {
    pub struct BalanceTransactionStatus {
        AVAILABLE = "available",
        PENDING = "pending",
    }
}

open_enum! {
    pub struct BalanceTransactionType {
        ADJUSTMENT = "adjustment",
        ADVANCE = "advance",
        ADVANCE_FUNDING = "advance_funding",
        ANTICIPATION_REPAYMENT = "anticipation_repayment",
        APPLICATION_FEE = "application_fee",
        APPLICATION_FEE_REFUND = "application_fee_refund",
        CHARGE = "charge",
        CLIMATE_ORDER_PURCHASE = "climate_order_purchase",
        CLIMATE_ORDER_REFUND = "climate_order_refund",
        CONNECT_COLLECTION_TRANSFER = "connect_collection_transfer",
        CONTRIBUTION = "contribution",
        ISSUING_AUTHORIZATION_HOLD = "issuing_authorization_hold",
        ISSUING_AUTHORIZATION_RELEASE = "issuing_authorization_release",
        ISSUING_DISPUTE = "issuing_dispute",
        ISSUING_TRANSACTION = "issuing_transaction",
        OBLIGATION_OUTBOUND = "obligation_outbound",
        OBLIGATION_REVERSAL_INBOUND = "obligation_reversal_inbound",
        PAYMENT = "payment",
        PAYMENT_FAILURE_REFUND = "payment_failure_refund",
        PAYMENT_NETWORK_RESERVE_HOLD = "payment_network_reserve_hold",
        PAYMENT_NETWORK_RESERVE_RELEASE = "payment_network_reserve_release",
        PAYMENT_REFUND = "payment_refund",
        PAYMENT_REVERSAL = "payment_reversal",
        PAYMENT_UNRECONCILED = "payment_unreconciled",
        PAYOUT = "payout",
        PAYOUT_CANCEL = "payout_cancel",
        PAYOUT_FAILURE = "payout_failure",
        PAYOUT_MINIMUM_BALANCE_HOLD = "payout_minimum_balance_hold",
        PAYOUT_MINIMUM_BALANCE_RELEASE = "payout_minimum_balance_release",
        REFUND = "refund",
        REFUND_FAILURE = "refund_failure",
        RESERVE_TRANSACTION = "reserve_transaction",
        RESERVED_FUNDS = "reserved_funds",
        STRIPE_FEE = "stripe_fee",
        STRIPE_FX_FEE = "stripe_fx_fee",
        TAX_FEE = "tax_fee",
        TOPUP = "topup",
        TOPUP_REVERSAL = "topup_reversal",
        TRANSFER = "transfer",
        TRANSFER_CANCEL = "transfer_cancel",
        TRANSFER_FAILURE = "transfer_failure",
        TRANSFER_REFUND = "transfer_refund",
    }
}

object_union! {
    /// The object a balance transaction was created for.
    pub enum BalanceTransactionSource {
        ApplicationFee(ApplicationFee) = "application_fee",
        Charge(Charge) = "charge",
        ConnectCollectionTransfer(ConnectCollectionTransfer) = "connect_collection_transfer",
        CustomerCashBalanceTransaction(CustomerCashBalanceTransaction) = "customer_cash_balance_transaction",
        Dispute(Dispute) = "dispute",
        FeeRefund(FeeRefund) = "fee_refund",
        IssuingAuthorization(IssuingAuthorization) = "issuing.authorization",
        IssuingDispute(IssuingDispute) = "issuing.dispute",
        IssuingTransaction(IssuingTransaction) = "issuing.transaction",
        Payout(Payout) = "payout",
        Refund(Refund) = "refund",
        ReserveTransaction(ReserveTransaction) = "reserve_transaction",
        TaxDeductedAtSource(TaxDeductedAtSource) = "tax_deducted_at_source",
        Topup(Topup) = "topup",
        Transfer(Transfer) = "transfer",
        TransferReversal(TransferReversal) = "transfer_reversal",
    }
}

impl BalanceTransactionSource {
    /// The discriminator as a typed value, known or not.
    pub fn source_type(&self) -> BalanceTransactionSourceType {
        BalanceTransactionSourceType::new(self.object())
    }

    pub fn as_charge(&self) -> Option<&Charge> {
        match self {
            BalanceTransactionSource::Charge(charge) => Some(charge.as_ref()),
            _ => None,
        }
    }

    pub fn as_payout(&self) -> Option<&Payout> {
        match self {
            BalanceTransactionSource::Payout(payout) => Some(payout.as_ref()),
            _ => None,
        }
    }
}

/// Funds a platform collected from a connected account's balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectCollectionTransfer {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub currency: Currency,
    /// The connected account the funds were collected from.
    pub destination: Option<Expandable<Account>>,
    pub livemode: bool,
}

impl HasId for ConnectCollectionTransfer {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReserveTransaction {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub currency: Currency,
    pub description: Option<String>,
}

impl HasId for ReserveTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// Tax withheld by a payer on Stripe fees, for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxDeductedAtSource {
    pub id: String,
    pub object: String,
    pub period_end: i64,
    pub period_start: i64,
    pub tax_deduction_account_number: String,
}

impl HasId for TaxDeductedAtSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeDetail {
    pub amount: i64,
    /// Connect application that earned the fee.
    pub application: Option<String>,
    pub currency: Currency,
    pub description: Option<String>,
    /// `application_fee`, `payment_method_passthrough_fee`, `stripe_fee` or `tax`.
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceTransaction {
    pub id: String,
    pub object: String,
    /// Gross amount, in minor units.
    pub amount: i64,
    /// When the funds become available, Unix seconds.
    pub available_on: i64,
    pub created: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub exchange_rate: Option<f64>,
    pub fee: i64,
    pub fee_details: Vec<FeeDetail>,
    /// `amount` minus `fee`.
    pub net: i64,
    pub reporting_category: BalanceTransactionReportingCategory,
    pub source: Option<Expandable<BalanceTransactionSource>>,
    pub status: BalanceTransactionStatus,
    #[serde(rename = "type")]
    pub type_: BalanceTransactionType,
}

impl BalanceTransaction {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.created)
    }

    pub fn available_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.available_on)
    }
}

impl HasId for BalanceTransaction {
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
pub struct BalanceTransactionParams {
    #[serde(flatten)]
    pub params: Params,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceTransactionListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub created: Option<RangeOrValue>,
    pub currency: Option<Currency>,
    /// Only transactions paid out in this payout.
    pub payout: Option<String>,
    /// Only transactions caused by this object.
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<BalanceTransactionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixture() -> serde_json::Value {
        json!({
            "id": "txn_1",
            "object": "balance_transaction",
            "amount": 2000,
            "available_on": 1700086400,
            "created": 1700000000,
            "currency": "usd",
            "description": "Payment for order 42",
            "exchange_rate": 1.2345,
            "fee": 88,
            "fee_details": [
                {"amount": 88, "currency": "usd", "description": "Stripe processing fees", "type": "stripe_fee"}
            ],
            "net": 1912,
            "reporting_category": "charge",
            "source": "ch_1",
            "status": "pending",
            "type": "charge"
        })
    }

    #[test]
    fn test_round_trip() {
        let raw = fixture();
        let txn: BalanceTransaction = assert_round_trip(&raw);
        assert_eq!(txn.net, 1912);
        assert_eq!(txn.status, BalanceTransactionStatus::PENDING);
        assert_eq!(txn.type_, BalanceTransactionType::CHARGE);
        assert_eq!(txn.fee_details[0].type_, "stripe_fee");
        assert_eq!(txn.source.as_ref().map(|s| s.id()), Some("ch_1"));
        assert_eq!(txn.created_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_null_fields_round_trip() {
        let mut raw = fixture();
        raw["description"] = json!(null);
        raw["exchange_rate"] = json!(null);
        raw["fee_details"][0]["application"] = json!(null);
        let txn: BalanceTransaction = assert_round_trip(&raw);
        assert_eq!(txn.description, None);
        assert_eq!(txn.exchange_rate, None);
    }

    #[test]
    fn test_expanded_charge_source() {
        let mut raw = fixture();
        raw["source"] = json!({"id": "ch_1", "object": "charge", "amount": 2000, "currency": "usd"});
        let txn: BalanceTransaction = serde_json::from_value(raw).unwrap();
        let source = txn.source.unwrap().into_object().unwrap();
        assert_eq!(source.source_type(), BalanceTransactionSourceType::CHARGE);
        assert_eq!(source.as_charge().unwrap().amount, 2000);
        assert!(source.as_payout().is_none());
        assert!(!source.is_unknown());
    }

    #[test]
    fn test_issuing_authorization_source() {
        let mut raw = fixture();
        raw["source"] = json!({
            "id": "iauth_1",
            "object": "issuing.authorization",
            "amount": 1500,
            "approved": true,
            "authorization_method": "chip",
            "created": 1700000000,
            "currency": "usd",
            "livemode": false,
            "merchant_amount": 1500,
            "merchant_currency": "usd",
            "metadata": {},
            "status": "pending",
            "wallet": null
        });
        raw["type"] = json!("issuing_authorization_hold");
        let txn: BalanceTransaction = assert_round_trip(&raw);
        let source = txn.source.as_ref().unwrap().as_object().unwrap();
        assert!(!source.is_unknown());
        assert_eq!(source.source_type(), BalanceTransactionSourceType::ISSUING_AUTHORIZATION);
        match source {
            BalanceTransactionSource::IssuingAuthorization(auth) => assert!(auth.approved),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_every_source_type_has_a_variant() {
        for kind in BalanceTransactionSourceType::KNOWN {
            assert!(BalanceTransactionSource::KNOWN.contains(kind), "{kind} has no variant");
        }
    }

    #[test]
    fn test_compact_sources() {
        let cases = [
            json!({"id": "connct_1", "object": "connect_collection_transfer", "amount": 300, "currency": "usd", "destination": "acct_1", "livemode": false}),
            json!({"id": "rtx_1", "object": "reserve_transaction", "amount": -500, "currency": "usd", "description": null}),
            json!({"id": "itds_1", "object": "tax_deducted_at_source", "period_end": 1700000000, "period_start": 1690000000, "tax_deduction_account_number": "BLRE12345A"}),
        ];
        for source in cases {
            let mut raw = fixture();
            raw["source"] = source.clone();
            let txn: BalanceTransaction = assert_round_trip(&raw);
            let decoded = txn.source.unwrap().into_object().unwrap();
            assert!(!decoded.is_unknown());
            assert_eq!(decoded.object(), source["object"]);
            assert_eq!(decoded.id(), source["id"]);
        }
    }

    #[test]
    fn test_unknown_source_keeps_discriminator() {
        let mut raw = fixture();
        raw["source"] = json!({"id": "ibt_1", "object": "treasury.inbound_transfer", "amount": 900});
        let txn: BalanceTransaction = assert_round_trip(&raw);
        let source = txn.source.as_ref().unwrap().as_object().unwrap();
        assert!(source.is_unknown());
        assert!(!source.source_type().is_known());
        assert!(source.as_charge().is_none());
        assert_eq!(source.id(), "ibt_1");
        assert_eq!(source.object(), "treasury.inbound_transfer");
    }

    #[test]
    fn test_unknown_type_value_is_preserved() {
        let mut raw = fixture();
        raw["type"] = json!("brand_new_type");
        let txn: BalanceTransaction = serde_json::from_value(raw).unwrap();
        assert_eq!(txn.type_, "brand_new_type");
        assert!(!txn.type_.is_known());
    }

    #[test]
    fn test_list_params() {
        let params = BalanceTransactionListParams {
            payout: Some("po_1".into()),
            type_: Some(BalanceTransactionType::PAYOUT),
            created: Some(RangeOrValue::gte(1_700_000_000)),
            ..Default::default()
        };
        assert_eq!(
            stripe_core::form::to_string(&params).unwrap(),
            "created[gte]=1700000000&payout=po_1&type=payout"
        );
    }
}
