//! # Application Fees
//!
//! Fees collected by a platform on charges made through connected accounts,
//! and the refunds issued against them.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{Currency, Expandable, HasId, List, ListParams, Params, RangeOrValue};

use crate::balance_transaction::BalanceTransaction;
use crate::charge::Charge;
use crate::payment_source::Account;
use crate::shared::Metadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationFee {
    pub id: String,
    pub object: String,
    pub account: Option<Expandable<Account>>,
    pub amount: i64,
    pub amount_refunded: i64,
    pub application: Option<Expandable<stripe_core::UnknownObject>>,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub charge: Option<Expandable<Charge>>,
    pub created: i64,
    pub currency: Currency,
    pub livemode: bool,
    pub originating_transaction: Option<Expandable<Charge>>,
    pub refunded: bool,
    pub refunds: Option<List<FeeRefund>>,
}

impl ApplicationFee {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.created)
    }
}

impl HasId for ApplicationFee {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// A refund of (part of) an application fee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeRefund {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub created: i64,
    pub currency: Currency,
    pub fee: Option<Expandable<ApplicationFee>>,
    pub metadata: Option<Metadata>,
}

impl HasId for FeeRefund {
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
pub struct ApplicationFeeListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub charge: Option<String>,
    pub created: Option<RangeOrValue>,
}

/// Create or update a fee refund. The fee id travels in the path.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeRefundParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_fee_refund_round_trip() {
        let raw = json!({
            "id": "fr_1MtJRpKbnvuxQXGuM6Ww0D24",
            "object": "fee_refund",
            "amount": 100,
            "balance_transaction": null,
            "created": 1680651573,
            "currency": "usd",
            "fee": "fee_1B73DOKbnvuxQXGuhY8Aw0TN",
            "metadata": {}
        });
        let refund: FeeRefund = assert_round_trip(&raw);
        assert_eq!(refund.balance_transaction, None);
        assert_eq!(refund.fee.as_ref().map(|f| f.id()), Some("fee_1B73DOKbnvuxQXGuhY8Aw0TN"));
    }

    #[test]
    fn test_application_fee_round_trip() {
        let raw = json!({
            "id": "fee_1B73DOKbnvuxQXGuhY8Aw0TN",
            "object": "application_fee",
            "account": "acct_164wxjKbnvuxQXGu",
            "amount": 105,
            "amount_refunded": 0,
            "application": "ca_32D88BD1qLklliziD7gYQvctJIhWBSQ7",
            "balance_transaction": "txn_1032HU2eZvKYlo2CEPtcnUvl",
            "charge": "ch_1B73DOKbnvuxQXGurbwPqzsu",
            "created": 1506609734,
            "currency": "gbp",
            "livemode": false,
            "originating_transaction": null,
            "refunded": false,
            "refunds": {"object": "list", "data": [], "has_more": false, "url": "/v1/application_fees/fee_1B73DOKbnvuxQXGuhY8Aw0TN/refunds"}
        });
        let fee: ApplicationFee = assert_round_trip(&raw);
        assert_eq!(fee.originating_transaction, None);
        assert_eq!(fee.application.as_ref().map(|a| a.id()), Some("ca_32D88BD1qLklliziD7gYQvctJIhWBSQ7"));
    }

    #[test]
    fn test_fee_with_refunds() {
        let fee: ApplicationFee = serde_json::from_str(
            r#"{
                "id": "fee_1",
                "object": "application_fee",
                "account": "acct_1",
                "amount": 100,
                "amount_refunded": 40,
                "charge": "ch_1",
                "currency": "usd",
                "refunds": {
                    "object": "list",
                    "data": [{"id": "fr_1", "object": "fee_refund", "amount": 40, "currency": "usd", "fee": "fee_1"}],
                    "has_more": false,
                    "url": "/v1/application_fees/fee_1/refunds"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(fee.account.as_ref().map(|a| a.id()), Some("acct_1"));
        let refunds = fee.refunds.unwrap();
        assert_eq!(refunds.last_id(), Some("fr_1"));
        assert_eq!(refunds.data[0].fee.as_ref().map(|f| f.id()), Some("fee_1"));
    }

    #[test]
    fn test_fee_refund_params() {
        let params = FeeRefundParams {
            amount: Some(40),
            ..Default::default()
        };
        assert_eq!(stripe_core::form::to_string(&params).unwrap(), "amount=40");
    }
}
