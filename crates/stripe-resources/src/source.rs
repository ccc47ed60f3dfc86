//! # Sources
//!
//! The legacy source object. Like charge payment-method details, `type`
//! names the kind and a slot of the same name holds its fields. Kinds
//! without a typed slot keep their raw fields in `unmodelled`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, HasId, Params};

use crate::payment_source::{CardBrand, CardCheck, CardFunding};
use crate::shared::{Address, AddressParams, Metadata, ShippingDetailsParams};

open_enum! {
    pub struct SourceFlow {
        CODE_VERIFICATION = "code_verification",
        NONE = "none",
        RECEIVER = "receiver",
        REDIRECT = "redirect",
    }
}

open_enum! {
    pub struct SourceType {
        ACH_CREDIT_TRANSFER = "ach_credit_transfer",
        ACH_DEBIT = "ach_debit",
        ACSS_DEBIT = "acss_debit",
        ALIPAY = "alipay",
        AU_BECS_DEBIT = "au_becs_debit",
        BANCONTACT = "bancontact",
        CARD = "card",
        CARD_PRESENT = "card_present",
        EPS = "eps",
        GIROPAY = "giropay",
        IDEAL = "ideal",
        KLARNA = "klarna",
        MULTIBANCO = "multibanco",
        P24 = "p24",
        SEPA_CREDIT_TRANSFER = "sepa_credit_transfer",
        SEPA_DEBIT = "sepa_debit",
        SOFORT = "sofort",
        THREE_D_SECURE = "three_d_secure",
        WECHAT = "wechat",
    }
}

open_enum! {
    pub struct SourceStatus {
        CANCELED = "canceled",
        CHARGEABLE = "chargeable",
        CONSUMED = "consumed",
        FAILED = "failed",
        PENDING = "pending",
    }
}

open_enum! {
    pub struct SourceUsage {
        REUSABLE = "reusable",
        SINGLE_USE = "single_use",
    }
}

open_enum! {
    pub struct SourceRedirectStatus {
        FAILED = "failed",
        NOT_REQUIRED = "not_required",
        PENDING = "pending",
        SUCCEEDED = "succeeded",
    }
}

open_enum! {
    pub struct SourceRedirectFailureReason {
        DECLINED = "declined",
        PROCESSING_ERROR = "processing_error",
        USER_ABORT = "user_abort",
    }
}

open_enum! {
    pub struct SourceCodeVerificationStatus {
        FAILED = "failed",
        PENDING = "pending",
        SUCCEEDED = "succeeded",
    }
}

open_enum! {
    pub struct SourceRefundAttributesMethod {
        EMAIL = "email",
        MANUAL = "manual",
        NONE = "none",
    }
}

open_enum! {
    pub struct SourceRefundAttributesStatus {
        AVAILABLE = "available",
        MISSING = "missing",
        REQUESTED = "requested",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOwner {
    pub address: Option<Address>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub verified_address: Option<Address>,
    pub verified_email: Option<String>,
    pub verified_name: Option<String>,
    pub verified_phone: Option<String>,
}

/// Push-flow receiver details, e.g. the account a customer transfers to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceReceiver {
    pub address: Option<String>,
    pub amount_charged: i64,
    pub amount_received: i64,
    pub amount_returned: i64,
    pub refund_attributes_method: Option<SourceRefundAttributesMethod>,
    pub refund_attributes_status: Option<SourceRefundAttributesStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRedirect {
    pub failure_reason: Option<SourceRedirectFailureReason>,
    pub return_url: Option<String>,
    pub status: Option<SourceRedirectStatus>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCodeVerification {
    pub attempts_remaining: i64,
    pub status: Option<SourceCodeVerificationStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceAchCreditTransfer {
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub fingerprint: Option<String>,
    pub refund_account_holder_name: Option<String>,
    pub refund_account_holder_type: Option<String>,
    pub refund_routing_number: Option<String>,
    pub routing_number: Option<String>,
    pub swift_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceAchDebit {
    pub bank_name: Option<String>,
    pub country: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub routing_number: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCard {
    pub address_line1_check: Option<CardCheck>,
    pub address_zip_check: Option<CardCheck>,
    pub brand: Option<CardBrand>,
    pub country: Option<String>,
    pub cvc_check: Option<CardCheck>,
    pub description: Option<String>,
    pub dynamic_last4: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub fingerprint: Option<String>,
    pub funding: Option<CardFunding>,
    pub iin: Option<String>,
    pub issuer: Option<String>,
    pub last4: Option<String>,
    pub name: Option<String>,
    /// `required`, `recommended`, `optional` or `not_supported`.
    pub three_d_secure: Option<String>,
    pub tokenization_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSepaDebit {
    pub bank_code: Option<String>,
    pub branch_code: Option<String>,
    pub country: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub mandate_reference: Option<String>,
    pub mandate_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceThreeDSecure {
    pub address_line1_check: Option<CardCheck>,
    pub address_zip_check: Option<CardCheck>,
    pub authenticated: Option<bool>,
    pub brand: Option<CardBrand>,
    pub card: Option<String>,
    pub country: Option<String>,
    pub customer: Option<String>,
    pub cvc_check: Option<CardCheck>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub fingerprint: Option<String>,
    pub funding: Option<CardFunding>,
    pub last4: Option<String>,
    pub three_d_secure: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub id: String,
    pub object: String,
    pub ach_credit_transfer: Option<SourceAchCreditTransfer>,
    pub ach_debit: Option<SourceAchDebit>,
    pub allow_redisplay: Option<String>,
    pub amount: Option<i64>,
    pub card: Option<SourceCard>,
    pub client_secret: Option<String>,
    pub code_verification: Option<SourceCodeVerification>,
    pub created: Option<i64>,
    pub currency: Option<Currency>,
    /// Owning customer id, only set once attached.
    pub customer: Option<String>,
    pub flow: Option<SourceFlow>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub owner: Option<SourceOwner>,
    pub receiver: Option<SourceReceiver>,
    pub redirect: Option<SourceRedirect>,
    pub sepa_debit: Option<SourceSepaDebit>,
    pub statement_descriptor: Option<String>,
    pub status: Option<SourceStatus>,
    pub three_d_secure: Option<SourceThreeDSecure>,
    #[serde(rename = "type")]
    pub type_: SourceType,
    pub usage: Option<SourceUsage>,

    /// Detail objects for source types without a typed slot.
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl Source {
    /// Raw details for a type that has no typed slot.
    pub fn raw_details(&self) -> Option<&Value> {
        self.unmodelled.get(self.type_.as_str())
    }

    pub fn is_chargeable(&self) -> bool {
        self.status.as_ref() == Some(&SourceStatus::CHARGEABLE)
    }
}

impl HasId for Source {
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
pub struct SourceOwnerParams {
    pub address: Option<AddressParams>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMandateOnlineParams {
    pub date: Option<i64>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMandateOfflineParams {
    pub contact_email: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMandateAcceptanceParams {
    pub date: Option<i64>,
    pub ip: Option<String>,
    pub offline: Option<SourceMandateOfflineParams>,
    pub online: Option<SourceMandateOnlineParams>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub user_agent: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMandateParams {
    pub acceptance: Option<SourceMandateAcceptanceParams>,
    pub amount: Option<i64>,
    pub currency: Option<Currency>,
    pub interval: Option<String>,
    pub notification_method: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOrderItemParams {
    pub amount: Option<i64>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub quantity: Option<i64>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOrderParams {
    pub items: Option<Vec<SourceOrderItemParams>>,
    pub shipping: Option<ShippingDetailsParams>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceReceiverParams {
    pub refund_attributes_method: Option<SourceRefundAttributesMethod>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRedirectParams {
    pub return_url: Option<String>,
}

/// Create or update a source object.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceObjectParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub client_secret: Option<String>,
    pub currency: Option<Currency>,
    pub customer: Option<String>,
    pub flow: Option<SourceFlow>,
    pub mandate: Option<SourceMandateParams>,
    pub metadata: Option<Metadata>,
    pub original_source: Option<String>,
    pub owner: Option<SourceOwnerParams>,
    pub receiver: Option<SourceReceiverParams>,
    pub redirect: Option<SourceRedirectParams>,
    pub source_order: Option<SourceOrderParams>,
    pub statement_descriptor: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<SourceType>,
    pub usage: Option<SourceUsage>,
}
