//! # Registry
//!
//! Name tables for the resource and parameter types the CLI understands.
//!
//! Resources:
//! - `application_fee`, `balance_transaction`, `charge`, `customer`
//! - `customer_cash_balance_transaction`, `dispute`, `event`
//! - `issuing_authorization`, `issuing_dispute`, `issuing_transaction`
//! - `payment_intent`, `payout`, `refund`
//! - `source`, `tax_transaction`, `topup`, `transfer`
//! - `payment_source` (card, bank account or account union)
//!
//! Parameters: `<resource>` for create/update, `<resource>_list` for list
//! filters, plus endpoint-specific names such as `charge_capture`.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stripe_core::codec::body_sample;
use stripe_core::{log_debug, Codec, HasId, WireError, WireResult};
use stripe_resources::{
    balance_transaction, charge, customer, dispute, event, fees, issuing, payment_intent,
    payment_source, payout, refund, source, tax_transaction, topup, transfer,
};

/// Decodes a body as one resource type and summarises it.
pub type DecodeFn = fn(&Codec, &[u8]) -> WireResult<Summary>;

/// Reads JSON parameters and encodes them as a form body.
pub type EncodeFn = fn(&Codec, &[u8]) -> WireResult<String>;

/// One-line description of a decoded resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub object: String,
    pub id: String,
    pub fields: Vec<(&'static str, String)>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.object, self.id)?;
        for (name, value) in &self.fields {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}

const SUMMARY_FIELDS: &[&str] = &["amount", "currency", "status", "type"];

fn decode_as<T>(codec: &Codec, body: &[u8]) -> WireResult<Summary>
where
    T: DeserializeOwned + Serialize + HasId,
{
    let resource: T = codec.decode(body)?;
    let json = serde_json::to_value(&resource).map_err(|source| WireError::Serialize {
        target: type_name::<T>(),
        source,
    })?;

    let fields = SUMMARY_FIELDS
        .iter()
        .filter_map(|&name| match json.get(name)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some((name, s.clone())),
            Value::Null => None,
            other => Some((name, other.to_string())),
        })
        .collect();

    Ok(Summary {
        object: resource.object().to_string(),
        id: resource.id().to_string(),
        fields,
    })
}

fn decode_payment_source(codec: &Codec, body: &[u8]) -> WireResult<Summary> {
    let source: payment_source::PaymentSource = codec.decode(body)?;
    let kind = if source.is_unknown() { "unknown" } else { "known" };
    Ok(Summary {
        object: source.object().to_string(),
        id: source.id().to_string(),
        fields: vec![("variant", kind.to_string())],
    })
}

fn encode_as<P>(codec: &Codec, body: &[u8]) -> WireResult<String>
where
    P: DeserializeOwned + Serialize,
{
    let logger = codec.logger().clone();
    log_debug!(logger, "Params body: {}", String::from_utf8_lossy(body));

    // Params are input, not a response: an "error" key is just a field.
    let params: P = serde_json::from_slice(body).map_err(|source| WireError::Decode {
        target: type_name::<P>(),
        sample: body_sample(body),
        source,
    })?;
    codec.encode_params(&params)
}

/// Resource kinds accepted by `decode`.
pub const RESOURCES: &[(&str, DecodeFn)] = &[
    ("application_fee", decode_as::<fees::ApplicationFee>),
    ("balance_transaction", decode_as::<balance_transaction::BalanceTransaction>),
    ("charge", decode_as::<charge::Charge>),
    ("customer", decode_as::<customer::Customer>),
    ("customer_cash_balance_transaction", decode_as::<customer::CustomerCashBalanceTransaction>),
    ("dispute", decode_as::<dispute::Dispute>),
    ("event", decode_as::<event::Event>),
    ("fee_refund", decode_as::<fees::FeeRefund>),
    ("issuing_authorization", decode_as::<issuing::IssuingAuthorization>),
    ("issuing_dispute", decode_as::<issuing::IssuingDispute>),
    ("issuing_transaction", decode_as::<issuing::IssuingTransaction>),
    ("payment_intent", decode_as::<payment_intent::PaymentIntent>),
    ("payment_source", decode_payment_source),
    ("payout", decode_as::<payout::Payout>),
    ("refund", decode_as::<refund::Refund>),
    ("source", decode_as::<source::Source>),
    ("tax_transaction", decode_as::<tax_transaction::TaxTransaction>),
    ("topup", decode_as::<topup::Topup>),
    ("transfer", decode_as::<transfer::Transfer>),
    ("transfer_reversal", decode_as::<transfer::TransferReversal>),
];

/// Parameter kinds accepted by `encode`.
pub const PARAMS: &[(&str, EncodeFn)] = &[
    ("application_fee_list", encode_as::<fees::ApplicationFeeListParams>),
    ("balance_transaction", encode_as::<balance_transaction::BalanceTransactionParams>),
    ("balance_transaction_list", encode_as::<balance_transaction::BalanceTransactionListParams>),
    ("charge", encode_as::<charge::ChargeParams>),
    ("charge_capture", encode_as::<charge::ChargeCaptureParams>),
    ("charge_list", encode_as::<charge::ChargeListParams>),
    ("charge_search", encode_as::<charge::ChargeSearchParams>),
    ("customer", encode_as::<customer::CustomerParams>),
    ("customer_list", encode_as::<customer::CustomerListParams>),
    ("dispute", encode_as::<dispute::DisputeParams>),
    ("dispute_list", encode_as::<dispute::DisputeListParams>),
    ("event_list", encode_as::<event::EventListParams>),
    ("fee_refund", encode_as::<fees::FeeRefundParams>),
    ("payment_source", encode_as::<payment_source::PaymentSourceParams>),
    ("payout", encode_as::<payout::PayoutParams>),
    ("payout_list", encode_as::<payout::PayoutListParams>),
    ("payout_reverse", encode_as::<payout::PayoutReverseParams>),
    ("refund", encode_as::<refund::RefundParams>),
    ("refund_list", encode_as::<refund::RefundListParams>),
    ("source", encode_as::<source::SourceObjectParams>),
    ("tax_transaction_from_calculation", encode_as::<tax_transaction::TaxTransactionCreateFromCalculationParams>),
    ("tax_transaction_line_items", encode_as::<tax_transaction::TaxTransactionListLineItemsParams>),
    ("tax_transaction_reversal", encode_as::<tax_transaction::TaxTransactionCreateReversalParams>),
    ("topup", encode_as::<topup::TopupParams>),
    ("topup_list", encode_as::<topup::TopupListParams>),
    ("transfer", encode_as::<transfer::TransferParams>),
    ("transfer_list", encode_as::<transfer::TransferListParams>),
    ("transfer_reversal", encode_as::<transfer::TransferReversalParams>),
];

fn find<F: Copy>(table: &[(&str, F)], kind: &str) -> Option<F> {
    table.iter().find(|(name, _)| *name == kind).map(|&(_, f)| f)
}

pub fn resource(kind: &str) -> Option<DecodeFn> {
    find(RESOURCES, kind)
}

pub fn params(kind: &str) -> Option<EncodeFn> {
    find(PARAMS, kind)
}

pub fn resource_names() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(name, _)| *name)
}

pub fn params_names() -> impl Iterator<Item = &'static str> {
    PARAMS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tables_are_sorted_and_unique() {
        for table in [resource_names().collect::<Vec<_>>(), params_names().collect::<Vec<_>>()] {
            let mut sorted = table.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(table, sorted);
        }
    }

    #[test]
    fn test_decode_summary() {
        let codec = Codec::default();
        let decode = resource("charge").unwrap();
        let summary = decode(
            &codec,
            br#"{"id":"ch_1","object":"charge","amount":500,"currency":"usd","status":"succeeded"}"#,
        )
        .unwrap();

        assert_eq!(summary.to_string(), "charge ch_1 amount=500 currency=usd status=succeeded");
    }

    #[test]
    fn test_decode_payment_source_union() {
        let codec = Codec::default();
        let decode = resource("payment_source").unwrap();

        let card = decode(&codec, br#"{"id":"card_1","object":"card"}"#).unwrap();
        assert_eq!(card.to_string(), "card card_1 variant=known");

        let other = decode(&codec, br#"{"id":"x_1","object":"gift_card"}"#).unwrap();
        assert_eq!(other.to_string(), "gift_card x_1 variant=unknown");
    }

    #[test]
    fn test_encode_params() {
        let codec = Codec::default();
        let encode = params("refund").unwrap();
        let body = encode(&codec, br#"{"charge":"ch_1","amount":0}"#).unwrap();

        assert_eq!(body, "amount=0&charge=ch_1");
    }

    #[test]
    fn test_encode_params_with_error_key() {
        let codec = Codec::default();
        let encode = params("refund").unwrap();
        let body = encode(&codec, br#"{"charge":"ch_1","error":{"type":"card_error","message":"x"}}"#).unwrap();

        assert_eq!(body, "charge=ch_1");
    }

    #[test]
    fn test_encode_params_malformed() {
        let codec = Codec::default();
        let encode = params("refund").unwrap();
        let err = encode(&codec, br#"{"amount":"lots"}"#).unwrap_err();

        assert!(err.is_decode());
        assert!(err.to_string().contains("RefundParams"));
    }

    #[derive(serde::Deserialize)]
    struct Unprintable {
        id: String,
    }

    impl Serialize for Unprintable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    impl HasId for Unprintable {
        fn id(&self) -> &str {
            &self.id
        }

        fn object(&self) -> &str {
            "unprintable"
        }
    }

    #[test]
    fn test_decode_summary_reports_serialize_failure() {
        let codec = Codec::default();
        let err = decode_as::<Unprintable>(&codec, br#"{"id":"x_1"}"#).unwrap_err();

        assert!(matches!(err, WireError::Serialize { .. }));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_decode_issuing_authorization() {
        let codec = Codec::default();
        let decode = resource("issuing_authorization").unwrap();
        let summary = decode(
            &codec,
            br#"{"id":"iauth_1","object":"issuing.authorization","amount":1500,"currency":"usd","status":"pending"}"#,
        )
        .unwrap();

        assert_eq!(
            summary.to_string(),
            "issuing.authorization iauth_1 amount=1500 currency=usd status=pending"
        );
    }

    #[test]
    fn test_decode_summary_skips_null_fields() {
        let codec = Codec::default();
        let decode = resource("refund").unwrap();
        let summary = decode(&codec, br#"{"id":"re_1","object":"refund","amount":100,"currency":"usd","status":null}"#).unwrap();

        assert_eq!(summary.to_string(), "refund re_1 amount=100 currency=usd");
    }

    #[test]
    fn test_unknown_kind() {
        assert!(resource("coupon").is_none());
        assert!(params("coupon_list").is_none());
    }
}
