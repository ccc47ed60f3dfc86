//! # Disputes
//!
//! Chargebacks and inquiries raised by a cardholder's bank, plus the
//! evidence a merchant submits in response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, Expandable, HasId, ListParams, Params, RangeOrValue, UnknownObject};

use crate::balance_transaction::BalanceTransaction;
use crate::charge::Charge;
use crate::payment_intent::PaymentIntent;
use crate::shared::{Address, AddressParams, Metadata};

open_enum! {
    pub struct DisputeReason {
        BANK_CANNOT_PROCESS = "bank_cannot_process",
        CHECK_RETURNED = "check_returned",
        CREDIT_NOT_PROCESSED = "credit_not_processed",
        CUSTOMER_INITIATED = "customer_initiated",
        DEBIT_NOT_AUTHORIZED = "debit_not_authorized",
        DUPLICATE = "duplicate",
        FRAUDULENT = "fraudulent",
        GENERAL = "general",
        INCORRECT_ACCOUNT_DETAILS = "incorrect_account_details",
        INSUFFICIENT_FUNDS = "insufficient_funds",
        PRODUCT_NOT_RECEIVED = "product_not_received",
        PRODUCT_UNACCEPTABLE = "product_unacceptable",
        SUBSCRIPTION_CANCELED = "subscription_canceled",
        UNRECOGNIZED = "unrecognized",
    }
}

open_enum! {
    pub struct DisputeStatus {
        LOST = "lost",
        NEEDS_RESPONSE = "needs_response",
        UNDER_REVIEW = "under_review",
        WARNING_CLOSED = "warning_closed",
        WARNING_NEEDS_RESPONSE = "warning_needs_response",
        WARNING_UNDER_REVIEW = "warning_under_review",
        WON = "won",
    }
}

open_enum! {
    pub struct DisputeEnhancedEligibilityType {
        VISA_COMPELLING_EVIDENCE_3 = "visa_compelling_evidence_3",
        VISA_COMPLIANCE = "visa_compliance",
    }
}

open_enum! {
    pub struct DisputePaymentMethodDetailsType {
        AMAZON_PAY = "amazon_pay",
        CARD = "card",
        KLARNA = "klarna",
        PAYPAL = "paypal",
    }
}

open_enum! {
    pub struct DisputeCardCaseType {
        CHARGEBACK = "chargeback",
        INQUIRY = "inquiry",
    }
}

impl DisputeStatus {
    /// True while the merchant can still submit evidence.
    pub fn awaits_response(&self) -> bool {
        *self == Self::NEEDS_RESPONSE || *self == Self::WARNING_NEEDS_RESPONSE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompellingEvidenceTransaction {
    pub charge: Option<String>,
    pub customer_account_id: Option<String>,
    pub customer_device_fingerprint: Option<String>,
    pub customer_device_id: Option<String>,
    pub customer_email_address: Option<String>,
    pub customer_purchase_ip: Option<String>,
    /// `merchandise` or `services`; disputed transaction only.
    pub merchandise_or_services: Option<String>,
    pub product_description: Option<String>,
    pub shipping_address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaCompellingEvidence3 {
    pub disputed_transaction: Option<CompellingEvidenceTransaction>,
    pub prior_undisputed_transactions: Vec<CompellingEvidenceTransaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaCompliance {
    pub fee_acknowledged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedEvidence {
    pub visa_compelling_evidence_3: Option<VisaCompellingEvidence3>,
    pub visa_compliance: Option<VisaCompliance>,
}

/// Evidence on file. Document fields hold file uploads, id or expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeEvidence {
    pub access_activity_log: Option<String>,
    pub billing_address: Option<String>,
    pub cancellation_policy: Option<Expandable<UnknownObject>>,
    pub cancellation_policy_disclosure: Option<String>,
    pub cancellation_rebuttal: Option<String>,
    pub customer_communication: Option<Expandable<UnknownObject>>,
    pub customer_email_address: Option<String>,
    pub customer_name: Option<String>,
    pub customer_purchase_ip: Option<String>,
    pub customer_signature: Option<Expandable<UnknownObject>>,
    pub duplicate_charge_documentation: Option<Expandable<UnknownObject>>,
    pub duplicate_charge_explanation: Option<String>,
    pub duplicate_charge_id: Option<String>,
    pub enhanced_evidence: Option<EnhancedEvidence>,
    pub product_description: Option<String>,
    pub receipt: Option<Expandable<UnknownObject>>,
    pub refund_policy: Option<Expandable<UnknownObject>>,
    pub refund_policy_disclosure: Option<String>,
    pub refund_refusal_explanation: Option<String>,
    pub service_date: Option<String>,
    pub service_documentation: Option<Expandable<UnknownObject>>,
    pub shipping_address: Option<String>,
    pub shipping_carrier: Option<String>,
    pub shipping_date: Option<String>,
    pub shipping_documentation: Option<Expandable<UnknownObject>>,
    pub shipping_tracking_number: Option<String>,
    pub uncategorized_file: Option<Expandable<UnknownObject>>,
    pub uncategorized_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityStatus {
    pub required_actions: Option<Vec<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedEligibility {
    pub visa_compelling_evidence_3: Option<EligibilityStatus>,
    pub visa_compliance: Option<EligibilityStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeEvidenceDetails {
    pub due_by: Option<i64>,
    pub enhanced_eligibility: Option<EnhancedEligibility>,
    pub has_evidence: bool,
    pub past_due: bool,
    pub submission_count: i64,
}

impl DisputeEvidenceDetails {
    pub fn due_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.due_by.and_then(stripe_core::time::from_unix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeAmazonPayDetails {
    /// `chargeback` or `claim`.
    pub dispute_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeCardDetails {
    pub brand: Option<String>,
    pub case_type: Option<DisputeCardCaseType>,
    pub network_reason_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeKlarnaDetails {
    pub reason_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputePaypalDetails {
    pub case_id: Option<String>,
    pub reason_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputePaymentMethodDetails {
    #[serde(rename = "type")]
    pub type_: DisputePaymentMethodDetailsType,
    pub amazon_pay: Option<DisputeAmazonPayDetails>,
    pub card: Option<DisputeCardDetails>,
    pub klarna: Option<DisputeKlarnaDetails>,
    pub paypal: Option<DisputePaypalDetails>,

    /// Detail objects for payment method types without a typed slot.
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl DisputePaymentMethodDetails {
    /// Raw details for a type that has no typed slot.
    pub fn raw_details(&self) -> Option<&Value> {
        self.unmodelled.get(self.type_.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dispute {
    pub id: String,
    pub object: String,
    pub amount: i64,
    /// Withdrawals and reinstatements caused by the dispute.
    pub balance_transactions: Vec<BalanceTransaction>,
    pub charge: Option<Expandable<Charge>>,
    pub created: i64,
    pub currency: Currency,
    pub enhanced_eligibility_types: Option<Vec<DisputeEnhancedEligibilityType>>,
    pub evidence: Option<DisputeEvidence>,
    pub evidence_details: Option<DisputeEvidenceDetails>,
    pub is_charge_refundable: bool,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub network_reason_code: Option<String>,
    pub payment_intent: Option<Expandable<PaymentIntent>>,
    pub payment_method_details: Option<DisputePaymentMethodDetails>,
    pub reason: DisputeReason,
    pub status: DisputeStatus,
}

impl HasId for Dispute {
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
pub struct CompellingEvidenceTransactionParams {
    pub charge: Option<String>,
    pub customer_account_id: Option<String>,
    pub customer_device_fingerprint: Option<String>,
    pub customer_device_id: Option<String>,
    pub customer_email_address: Option<String>,
    pub customer_purchase_ip: Option<String>,
    pub merchandise_or_services: Option<String>,
    pub product_description: Option<String>,
    pub shipping_address: Option<AddressParams>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaCompellingEvidence3Params {
    pub disputed_transaction: Option<CompellingEvidenceTransactionParams>,
    pub prior_undisputed_transactions: Option<Vec<CompellingEvidenceTransactionParams>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaComplianceParams {
    pub fee_acknowledged: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedEvidenceParams {
    pub visa_compelling_evidence_3: Option<VisaCompellingEvidence3Params>,
    pub visa_compliance: Option<VisaComplianceParams>,
}

/// Evidence fields; documents are referenced by file id.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeEvidenceParams {
    pub access_activity_log: Option<String>,
    pub billing_address: Option<String>,
    pub cancellation_policy: Option<String>,
    pub cancellation_policy_disclosure: Option<String>,
    pub cancellation_rebuttal: Option<String>,
    pub customer_communication: Option<String>,
    pub customer_email_address: Option<String>,
    pub customer_name: Option<String>,
    pub customer_purchase_ip: Option<String>,
    pub customer_signature: Option<String>,
    pub duplicate_charge_documentation: Option<String>,
    pub duplicate_charge_explanation: Option<String>,
    pub duplicate_charge_id: Option<String>,
    pub enhanced_evidence: Option<EnhancedEvidenceParams>,
    pub product_description: Option<String>,
    pub receipt: Option<String>,
    pub refund_policy: Option<String>,
    pub refund_policy_disclosure: Option<String>,
    pub refund_refusal_explanation: Option<String>,
    pub service_date: Option<String>,
    pub service_documentation: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_carrier: Option<String>,
    pub shipping_date: Option<String>,
    pub shipping_documentation: Option<String>,
    pub shipping_tracking_number: Option<String>,
    pub uncategorized_file: Option<String>,
    pub uncategorized_text: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeParams {
    #[serde(flatten)]
    pub params: Params,
    pub evidence: Option<DisputeEvidenceParams>,
    pub metadata: Option<Metadata>,
    /// Submit the evidence now instead of staging it.
    pub submit: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeListParams {
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
    fn test_dispute_round_trip() {
        let raw = json!({
            "id": "du_1MtJUT2eZvKYlo2CNaw2HvEv",
            "object": "dispute",
            "amount": 1000,
            "balance_transactions": [],
            "charge": "ch_1AZtxr2eZvKYlo2CJDX8whov",
            "created": 1680651737,
            "currency": "usd",
            "evidence": {
                "access_activity_log": null,
                "billing_address": null,
                "customer_email_address": null,
                "customer_name": null,
                "receipt": null,
                "uncategorized_text": null
            },
            "evidence_details": {"due_by": 1682294399, "has_evidence": false, "past_due": false, "submission_count": 0},
            "is_charge_refundable": true,
            "livemode": false,
            "metadata": {},
            "network_reason_code": null,
            "payment_intent": null,
            "payment_method_details": {
                "type": "card",
                "card": {"brand": "visa", "case_type": "chargeback", "network_reason_code": "83"}
            },
            "reason": "general",
            "status": "warning_needs_response"
        });
        let dispute: Dispute = assert_round_trip(&raw);
        assert!(dispute.is_charge_refundable);
        assert!(dispute.status.awaits_response());
        assert_eq!(dispute.payment_intent, None);
        assert_eq!(dispute.evidence.as_ref().unwrap().receipt, None);
    }

    #[test]
    fn test_unmodelled_payment_method_details() {
        let raw = json!({
            "type": "us_bank_account",
            "us_bank_account": {"bank_name": "STRIPE TEST BANK", "last4": "6789"}
        });
        let details: DisputePaymentMethodDetails = assert_round_trip(&raw);
        assert!(!details.type_.is_known());
        assert!(details.card.is_none());
        assert_eq!(
            details.raw_details().and_then(|d| d.get("last4")),
            Some(&json!("6789"))
        );
    }

    #[test]
    fn test_dispute_decode() {
        let dispute: Dispute = serde_json::from_str(
            r#"{
                "id": "dp_1",
                "object": "dispute",
                "amount": 1000,
                "balance_transactions": [
                    {"id": "txn_1", "object": "balance_transaction", "amount": -1000, "currency": "usd", "type": "adjustment"}
                ],
                "charge": "ch_1",
                "currency": "usd",
                "evidence": {"customer_name": "Jenny Rosen", "receipt": "file_1"},
                "evidence_details": {"due_by": 1700000000, "has_evidence": true, "past_due": false, "submission_count": 1},
                "payment_method_details": {"type": "card", "card": {"brand": "visa", "case_type": "chargeback", "network_reason_code": "10.4"}},
                "reason": "fraudulent",
                "status": "needs_response"
            }"#,
        )
        .unwrap();
        assert_eq!(dispute.reason, DisputeReason::FRAUDULENT);
        assert!(dispute.status.awaits_response());
        assert_eq!(dispute.balance_transactions[0].amount, -1000);

        let evidence = dispute.evidence.as_ref().unwrap();
        assert_eq!(evidence.receipt.as_ref().map(|f| f.id()), Some("file_1"));

        let details = dispute.evidence_details.as_ref().unwrap();
        assert_eq!(details.due_at().map(|t| t.timestamp()), Some(1_700_000_000));

        let method = dispute.payment_method_details.as_ref().unwrap();
        assert_eq!(method.type_, DisputePaymentMethodDetailsType::CARD);
        assert_eq!(
            method.card.as_ref().and_then(|c| c.case_type.clone()),
            Some(DisputeCardCaseType::CHARGEBACK)
        );
    }

    #[test]
    fn test_unknown_reason_kept() {
        let dispute: Dispute =
            serde_json::from_str(r#"{"id":"dp_2","reason":"noncompliant","status":"won"}"#).unwrap();
        assert_eq!(dispute.reason, "noncompliant");
        assert!(!dispute.reason.is_known());
        assert!(!dispute.status.awaits_response());
    }

    #[test]
    fn test_evidence_params() {
        let params = DisputeParams {
            evidence: Some(DisputeEvidenceParams {
                customer_name: Some("Jenny Rosen".into()),
                enhanced_evidence: Some(EnhancedEvidenceParams {
                    visa_compliance: Some(VisaComplianceParams {
                        fee_acknowledged: Some(true),
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            submit: Some(false),
            ..Default::default()
        };
        assert_eq!(
            stripe_core::form::to_string(&params).unwrap(),
            "evidence[customer_name]=Jenny+Rosen&evidence[enhanced_evidence][visa_compliance][fee_acknowledged]=true&submit=false"
        );
    }
}
