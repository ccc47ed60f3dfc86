//! # Refunds

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, Expandable, HasId, ListParams, Params, RangeOrValue};

use crate::balance_transaction::BalanceTransaction;
use crate::charge::Charge;
use crate::payment_intent::PaymentIntent;
use crate::shared::Metadata;
use crate::transfer::TransferReversal;

open_enum! {
    pub struct RefundReason {
        DUPLICATE = "duplicate",
        EXPIRED_UNCAPTURED_CHARGE = "expired_uncaptured_charge",
        FRAUDULENT = "fraudulent",
        REQUESTED_BY_CUSTOMER = "requested_by_customer",
    }
}

open_enum! {
    pub struct RefundStatus {
        CANCELED = "canceled",
        FAILED = "failed",
        PENDING = "pending",
        REQUIRES_ACTION = "requires_action",
        SUCCEEDED = "succeeded",
    }
}

open_enum! {
    pub struct RefundFailureReason {
        EXPIRED_OR_CANCELED_CARD = "expired_or_canceled_card",
        LOST_OR_STOLEN_CARD = "lost_or_stolen_card",
        UNKNOWN = "unknown",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub charge: Option<Expandable<Charge>>,
    pub created: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub failure_balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub failure_reason: Option<RefundFailureReason>,
    pub instructions_email: Option<String>,
    pub metadata: Option<Metadata>,
    pub payment_intent: Option<Expandable<PaymentIntent>>,
    pub reason: Option<RefundReason>,
    pub receipt_number: Option<String>,
    pub source_transfer_reversal: Option<Expandable<TransferReversal>>,
    pub status: Option<RefundStatus>,
    pub transfer_reversal: Option<Expandable<TransferReversal>>,
}

impl Refund {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.created)
    }
}

impl HasId for Refund {
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
pub struct RefundParams {
    #[serde(flatten)]
    pub params: Params,
    /// Partial refund amount; the full remaining amount when unset.
    pub amount: Option<i64>,
    pub charge: Option<String>,
    pub currency: Option<Currency>,
    pub instructions_email: Option<String>,
    pub metadata: Option<Metadata>,
    pub origin: Option<String>,
    pub payment_intent: Option<String>,
    pub reason: Option<RefundReason>,
    pub refund_application_fee: Option<bool>,
    pub reverse_transfer: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub charge: Option<String>,
    pub created: Option<RangeOrValue>,
    pub payment_intent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_refund_round_trip() {
        let raw = json!({
            "id": "re_1Nispe2eZvKYlo2Cd31jOCgZ",
            "object": "refund",
            "amount": 1000,
            "balance_transaction": "txn_1Nispe2eZvKYlo2CYezqFhEx",
            "charge": "ch_1NirD82eZvKYlo2CIvbtLWuY",
            "created": 1692942318,
            "currency": "usd",
            "description": null,
            "failure_balance_transaction": null,
            "failure_reason": null,
            "metadata": {},
            "payment_intent": "pi_1GszsK2eZvKYlo2CfhZyoZLp",
            "reason": null,
            "receipt_number": null,
            "source_transfer_reversal": null,
            "status": "succeeded",
            "transfer_reversal": null
        });
        let refund: Refund = assert_round_trip(&raw);
        assert_eq!(refund.reason, None);
        assert_eq!(refund.status, Some(RefundStatus::SUCCEEDED));
        assert_eq!(refund.charge.as_ref().map(|c| c.id()), Some("ch_1NirD82eZvKYlo2CIvbtLWuY"));
    }

    #[test]
    fn test_refund_decode() {
        let refund: Refund = serde_json::from_str(
            r#"{"id":"re_1","object":"refund","amount":100,"charge":"ch_1","currency":"eur","reason":"requested_by_customer","status":"succeeded"}"#,
        )
        .unwrap();
        assert_eq!(refund.charge.as_ref().map(|c| c.id()), Some("ch_1"));
        assert_eq!(refund.currency, Currency::EUR);
        assert_eq!(refund.reason, Some(RefundReason::REQUESTED_BY_CUSTOMER));
        assert_eq!(refund.status, Some(RefundStatus::SUCCEEDED));
    }

    #[test]
    fn test_refund_params() {
        let params = RefundParams {
            charge: Some("ch_1".into()),
            amount: Some(0),
            reverse_transfer: Some(true),
            ..Default::default()
        };
        assert_eq!(
            stripe_core::form::to_string(&params).unwrap(),
            "amount=0&charge=ch_1&reverse_transfer=true"
        );
    }
}
