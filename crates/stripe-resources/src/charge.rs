//! # Charges
//!
//! The charge object, its payment-method details and the parameters of the
//! charge endpoints.
//!
//! `payment_method_details` is a tagged structure: `type` names the payment
//! method and exactly one slot of the same name carries its details. Types
//! without a slot here still decode; their fields stay in `unmodelled`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use stripe_core::{
    open_enum, Currency, Expandable, HasId, List, ListParams, Params, RangeOrValue, SearchParams,
    UnknownObject,
};

use crate::balance_transaction::BalanceTransaction;
use crate::customer::Customer;
use crate::fees::ApplicationFee;
use crate::payment_intent::PaymentIntent;
use crate::payment_source::{Account, CardFunding, PaymentSource, SourceParams};
use crate::refund::Refund;
use crate::shared::{Address, Metadata, ShippingDetails, ShippingDetailsParams};
use crate::transfer::Transfer;

open_enum! {
    pub struct ChargeStatus {
        FAILED = "failed",
        PENDING = "pending",
        SUCCEEDED = "succeeded",
    }
}

open_enum! {
    pub struct ChargeFraudStripeReport {
        FRAUDULENT = "fraudulent",
    }
}

open_enum! {
    pub struct ChargeFraudUserReport {
        FRAUDULENT = "fraudulent",
        SAFE = "safe",
    }
}

open_enum! {
    /// Card brand as reported in payment-method details.
    pub struct PaymentMethodCardBrand {
        AMEX = "amex",
        DINERS = "diners",
        DISCOVER = "discover",
        EFTPOS_AU = "eftpos_au",
        JCB = "jcb",
        LINK = "link",
        MASTERCARD = "mastercard",
        UNIONPAY = "unionpay",
        UNKNOWN = "unknown",
        VISA = "visa",
    }
}

open_enum! {
    pub struct PaymentMethodDetailsType {
        ACH_CREDIT_TRANSFER = "ach_credit_transfer",
        ACH_DEBIT = "ach_debit",
        ACSS_DEBIT = "acss_debit",
        AFFIRM = "affirm",
        AFTERPAY_CLEARPAY = "afterpay_clearpay",
        ALIPAY = "alipay",
        AMAZON_PAY = "amazon_pay",
        AU_BECS_DEBIT = "au_becs_debit",
        BACS_DEBIT = "bacs_debit",
        BANCONTACT = "bancontact",
        BLIK = "blik",
        BOLETO = "boleto",
        CARD = "card",
        CARD_PRESENT = "card_present",
        CASHAPP = "cashapp",
        CUSTOMER_BALANCE = "customer_balance",
        EPS = "eps",
        FPX = "fpx",
        GIROPAY = "giropay",
        GRABPAY = "grabpay",
        IDEAL = "ideal",
        INTERAC_PRESENT = "interac_present",
        KLARNA = "klarna",
        KONBINI = "konbini",
        LINK = "link",
        MULTIBANCO = "multibanco",
        OXXO = "oxxo",
        P24 = "p24",
        PAYNOW = "paynow",
        PAYPAL = "paypal",
        PIX = "pix",
        PROMPTPAY = "promptpay",
        REVOLUT_PAY = "revolut_pay",
        SEPA_CREDIT_TRANSFER = "sepa_credit_transfer",
        SEPA_DEBIT = "sepa_debit",
        SOFORT = "sofort",
        STRIPE_ACCOUNT = "stripe_account",
        SWISH = "swish",
        US_BANK_ACCOUNT = "us_bank_account",
        WECHAT = "wechat",
        WECHAT_PAY = "wechat_pay",
        ZIP = "zip",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingDetails {
    pub address: Option<Address>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudDetails {
    pub stripe_report: Option<ChargeFraudStripeReport>,
    pub user_report: Option<ChargeFraudUserReport>,
}

/// Result of the network authorization and Radar review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeOutcome {
    pub advice_code: Option<String>,
    pub network_advice_code: Option<String>,
    pub network_decline_code: Option<String>,
    /// `approved_by_network`, `declined_by_network`, `not_sent_to_network`
    /// or `reversed_after_approval`.
    pub network_status: Option<String>,
    pub reason: Option<String>,
    pub risk_level: Option<String>,
    pub risk_score: Option<i64>,
    /// The Radar rule that triggered, id or expanded.
    pub rule: Option<Expandable<UnknownObject>>,
    pub seller_message: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeLevel3LineItem {
    pub discount_amount: Option<i64>,
    pub product_code: String,
    pub product_description: String,
    pub quantity: Option<i64>,
    pub tax_amount: Option<i64>,
    pub unit_cost: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeLevel3 {
    pub customer_reference: Option<String>,
    pub line_items: Vec<ChargeLevel3LineItem>,
    pub merchant_reference: String,
    pub shipping_address_zip: Option<String>,
    pub shipping_amount: Option<i64>,
    pub shipping_from_zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferData {
    pub amount: Option<i64>,
    pub destination: Option<Expandable<Account>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarOptions {
    pub session: Option<String>,
}

// Payment-method detail slots.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchCreditTransferDetails {
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub routing_number: Option<String>,
    pub swift_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchDebitDetails {
    pub account_holder_type: Option<String>,
    pub bank_name: Option<String>,
    pub country: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub routing_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcssDebitDetails {
    pub bank_name: Option<String>,
    pub fingerprint: Option<String>,
    pub institution_number: Option<String>,
    pub last4: Option<String>,
    pub mandate: Option<String>,
    pub transit_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffirmDetails {
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlipayDetails {
    pub buyer_id: Option<String>,
    pub fingerprint: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmazonPayFunding {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub card: Option<CardDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmazonPayDetails {
    pub funding: Option<AmazonPayFunding>,
}

/// Shared by bancontact, ideal and sofort, which settle through SEPA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankRedirectDetails {
    pub bank: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
    pub bic: Option<String>,
    pub country: Option<String>,
    pub generated_sepa_debit: Option<Expandable<UnknownObject>>,
    pub generated_sepa_debit_mandate: Option<Expandable<UnknownObject>>,
    pub iban_last4: Option<String>,
    pub preferred_language: Option<String>,
    pub verified_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardChecks {
    pub address_line1_check: Option<String>,
    pub address_postal_code_check: Option<String>,
    pub cvc_check: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeDSecureDetails {
    pub authentication_flow: Option<String>,
    pub electronic_commerce_indicator: Option<String>,
    pub exemption_indicator: Option<String>,
    pub exemption_indicator_applied: Option<bool>,
    pub result: Option<String>,
    pub result_reason: Option<String>,
    pub transaction_id: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardWallet {
    pub dynamic_last4: Option<String>,
    /// `amex_express_checkout`, `apple_pay`, `google_pay`, `link`, ...
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub amount_authorized: Option<i64>,
    pub authorization_code: Option<String>,
    pub brand: Option<PaymentMethodCardBrand>,
    pub capture_before: Option<i64>,
    pub checks: Option<CardChecks>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub fingerprint: Option<String>,
    pub funding: Option<CardFunding>,
    pub iin: Option<String>,
    pub issuer: Option<String>,
    pub last4: Option<String>,
    pub mandate: Option<String>,
    pub moto: Option<bool>,
    pub network: Option<String>,
    pub network_transaction_id: Option<String>,
    pub regulated_status: Option<String>,
    pub three_d_secure: Option<ThreeDSecureDetails>,
    pub wallet: Option<CardWallet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardPresentDetails {
    pub amount_authorized: Option<i64>,
    pub brand: Option<PaymentMethodCardBrand>,
    pub brand_product: Option<String>,
    pub capture_before: Option<i64>,
    pub cardholder_name: Option<String>,
    pub country: Option<String>,
    pub emv_auth_data: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub fingerprint: Option<String>,
    pub funding: Option<CardFunding>,
    pub generated_card: Option<String>,
    pub incremental_authorization_supported: Option<bool>,
    pub last4: Option<String>,
    pub network: Option<String>,
    pub network_transaction_id: Option<String>,
    pub overcapture_supported: Option<bool>,
    pub preferred_locales: Option<Vec<String>>,
    pub read_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashAppDetails {
    pub buyer_id: Option<String>,
    pub cashtag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KlarnaDetails {
    pub payment_method_category: Option<String>,
    pub preferred_locale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkDetails {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaypalDetails {
    pub country: Option<String>,
    pub payer_email: Option<String>,
    pub payer_id: Option<String>,
    pub payer_name: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SepaDebitDetails {
    pub bank_code: Option<String>,
    pub branch_code: Option<String>,
    pub country: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub mandate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsBankAccountDetails {
    pub account_holder_type: Option<String>,
    pub account_type: Option<String>,
    pub bank_name: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub mandate: Option<Expandable<UnknownObject>>,
    pub payment_reference: Option<String>,
    pub routing_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeChatPayDetails {
    pub fingerprint: Option<String>,
    pub transaction_id: Option<String>,
}

/// Transaction-specific details of the payment method used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargePaymentMethodDetails {
    #[serde(rename = "type")]
    pub type_: PaymentMethodDetailsType,
    pub ach_credit_transfer: Option<AchCreditTransferDetails>,
    pub ach_debit: Option<AchDebitDetails>,
    pub acss_debit: Option<AcssDebitDetails>,
    pub affirm: Option<AffirmDetails>,
    pub alipay: Option<AlipayDetails>,
    pub amazon_pay: Option<AmazonPayDetails>,
    pub bancontact: Option<BankRedirectDetails>,
    pub card: Option<CardDetails>,
    pub card_present: Option<CardPresentDetails>,
    pub cashapp: Option<CashAppDetails>,
    pub ideal: Option<BankRedirectDetails>,
    pub klarna: Option<KlarnaDetails>,
    pub link: Option<LinkDetails>,
    pub paypal: Option<PaypalDetails>,
    pub sepa_debit: Option<SepaDebitDetails>,
    pub sofort: Option<BankRedirectDetails>,
    pub us_bank_account: Option<UsBankAccountDetails>,
    pub wechat_pay: Option<WeChatPayDetails>,

    /// Detail objects for payment method types without a typed slot.
    #[serde(flatten)]
    pub unmodelled: BTreeMap<String, Value>,
}

impl ChargePaymentMethodDetails {
    /// Number of typed slots that are filled.
    pub fn filled_slots(&self) -> usize {
        [
            self.ach_credit_transfer.is_some(),
            self.ach_debit.is_some(),
            self.acss_debit.is_some(),
            self.affirm.is_some(),
            self.alipay.is_some(),
            self.amazon_pay.is_some(),
            self.bancontact.is_some(),
            self.card.is_some(),
            self.card_present.is_some(),
            self.cashapp.is_some(),
            self.ideal.is_some(),
            self.klarna.is_some(),
            self.link.is_some(),
            self.paypal.is_some(),
            self.sepa_debit.is_some(),
            self.sofort.is_some(),
            self.us_bank_account.is_some(),
            self.wechat_pay.is_some(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
    }

    /// Raw details for a type that has no typed slot.
    pub fn raw_details(&self) -> Option<&Value> {
        self.unmodelled.get(self.type_.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub amount_captured: i64,
    pub amount_refunded: i64,
    pub application: Option<Expandable<UnknownObject>>,
    pub application_fee: Option<Expandable<ApplicationFee>>,
    pub application_fee_amount: Option<i64>,
    pub authorization_code: Option<String>,
    pub balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub billing_details: Option<BillingDetails>,
    pub calculated_statement_descriptor: Option<String>,
    pub captured: bool,
    pub created: i64,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    pub description: Option<String>,
    pub disputed: bool,
    pub failure_balance_transaction: Option<Expandable<BalanceTransaction>>,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub fraud_details: Option<FraudDetails>,
    pub invoice: Option<Expandable<UnknownObject>>,
    pub level3: Option<ChargeLevel3>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub on_behalf_of: Option<Expandable<Account>>,
    pub outcome: Option<ChargeOutcome>,
    pub paid: bool,
    pub payment_intent: Option<Expandable<PaymentIntent>>,
    pub payment_method: Option<String>,
    pub payment_method_details: Option<ChargePaymentMethodDetails>,
    pub radar_options: Option<RadarOptions>,
    pub receipt_email: Option<String>,
    pub receipt_number: Option<String>,
    pub receipt_url: Option<String>,
    pub refunded: bool,
    pub refunds: Option<List<Refund>>,
    pub review: Option<Expandable<UnknownObject>>,
    pub shipping: Option<ShippingDetails>,
    pub source: Option<Expandable<PaymentSource>>,
    pub source_transfer: Option<Expandable<Transfer>>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub status: ChargeStatus,
    pub transfer: Option<Expandable<Transfer>>,
    pub transfer_data: Option<TransferData>,
    pub transfer_group: Option<String>,
}

impl Charge {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.created)
    }

    /// Amount still refundable, in minor units.
    pub fn refundable(&self) -> i64 {
        (self.amount_captured - self.amount_refunded).max(0)
    }
}

impl HasId for Charge {
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
pub struct ChargeDestinationParams {
    pub account: Option<String>,
    pub amount: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeFraudDetailsParams {
    /// `fraudulent` or `safe`; an empty string clears a previous report.
    pub user_report: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeLevel3LineItemParams {
    pub discount_amount: Option<i64>,
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    pub quantity: Option<i64>,
    pub tax_amount: Option<i64>,
    pub unit_cost: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeLevel3Params {
    pub customer_reference: Option<String>,
    pub line_items: Option<Vec<ChargeLevel3LineItemParams>>,
    pub merchant_reference: Option<String>,
    pub shipping_address_zip: Option<String>,
    pub shipping_amount: Option<i64>,
    pub shipping_from_zip: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeRadarOptionsParams {
    pub session: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeTransferDataParams {
    pub amount: Option<i64>,
    pub destination: Option<String>,
}

/// Create or update a charge.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub application_fee: Option<i64>,
    pub application_fee_amount: Option<i64>,
    /// Set to `false` to authorize now and capture later.
    pub capture: Option<bool>,
    pub currency: Option<Currency>,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub destination: Option<ChargeDestinationParams>,
    pub exchange_rate: Option<f64>,
    pub fraud_details: Option<ChargeFraudDetailsParams>,
    pub level3: Option<ChargeLevel3Params>,
    pub metadata: Option<Metadata>,
    pub on_behalf_of: Option<String>,
    pub radar_options: Option<ChargeRadarOptionsParams>,
    pub receipt_email: Option<String>,
    pub shipping: Option<ShippingDetailsParams>,
    #[serde(flatten)]
    pub source: Option<SourceParams>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub transfer_data: Option<ChargeTransferDataParams>,
    pub transfer_group: Option<String>,
}

impl ChargeParams {
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
    }

    pub fn set_source(&mut self, source: impl Into<SourceParams>) {
        self.source = Some(source.into());
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeCaptureTransferDataParams {
    pub amount: Option<i64>,
}

/// Capture a previously authorized charge.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeCaptureParams {
    #[serde(flatten)]
    pub params: Params,
    pub amount: Option<i64>,
    pub application_fee: Option<i64>,
    pub application_fee_amount: Option<i64>,
    pub exchange_rate: Option<f64>,
    pub receipt_email: Option<String>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub transfer_data: Option<ChargeCaptureTransferDataParams>,
    pub transfer_group: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub created: Option<RangeOrValue>,
    pub customer: Option<String>,
    pub payment_intent: Option<String>,
    pub transfer_group: Option<String>,
}

/// Search charges with the query language, e.g. `amount>999`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeSearchParams {
    #[serde(flatten)]
    pub search: SearchParams,
}

impl ChargeSearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            search: SearchParams::new(query),
        }
    }
}
