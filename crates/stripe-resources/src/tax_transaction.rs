//! # Tax Transactions
//!
//! Committed tax calculations and their reversals.
//!
//! Percentages arrive as decimal strings (`"8.875"`) and are carried as
//! strings so no precision is lost on the way back out.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, Currency, HasId, List, ListParams, Params};

use crate::shared::{Address, Metadata};

open_enum! {
    pub struct TaxTransactionType {
        REVERSAL = "reversal",
        TRANSACTION = "transaction",
    }
}

open_enum! {
    pub struct AddressSource {
        BILLING = "billing",
        SHIPPING = "shipping",
    }
}

open_enum! {
    pub struct TaxabilityOverride {
        CUSTOMER_EXEMPT = "customer_exempt",
        NONE = "none",
        REVERSE_CHARGE = "reverse_charge",
    }
}

open_enum! {
    pub struct TaxBehavior {
        EXCLUSIVE = "exclusive",
        INCLUSIVE = "inclusive",
    }
}

open_enum! {
    pub struct JurisdictionLevel {
        CITY = "city",
        COUNTRY = "country",
        COUNTY = "county",
        DISTRICT = "district",
        STATE = "state",
    }
}

open_enum! {
    pub struct TaxSourcing {
        DESTINATION = "destination",
        ORIGIN = "origin",
    }
}

open_enum! {
    pub struct TaxType {
        AMUSEMENT_TAX = "amusement_tax",
        COMMUNICATIONS_TAX = "communications_tax",
        GST = "gst",
        HST = "hst",
        IGST = "igst",
        JCT = "jct",
        LEASE_TAX = "lease_tax",
        PST = "pst",
        QST = "qst",
        RETAIL_DELIVERY_FEE = "retail_delivery_fee",
        RST = "rst",
        SALES_TAX = "sales_tax",
        SERVICE_TAX = "service_tax",
        VAT = "vat",
    }
}

open_enum! {
    pub struct TaxabilityReason {
        CUSTOMER_EXEMPT = "customer_exempt",
        NOT_COLLECTING = "not_collecting",
        NOT_SUBJECT_TO_TAX = "not_subject_to_tax",
        NOT_SUPPORTED = "not_supported",
        PORTION_PRODUCT_EXEMPT = "portion_product_exempt",
        PORTION_REDUCED_RATED = "portion_reduced_rated",
        PORTION_STANDARD_RATED = "portion_standard_rated",
        PRODUCT_EXEMPT = "product_exempt",
        PRODUCT_EXEMPT_HOLIDAY = "product_exempt_holiday",
        PROPORTIONALLY_RATED = "proportionally_rated",
        REDUCED_RATED = "reduced_rated",
        REVERSE_CHARGE = "reverse_charge",
        STANDARD_RATED = "standard_rated",
        TAXABLE_BASIS_REDUCED = "taxable_basis_reduced",
        ZERO_RATED = "zero_rated",
    }
}

open_enum! {
    /// Customer tax id kinds. The list grows often; unknown kinds pass through.
    pub struct TaxIdType {
        AD_NRT = "ad_nrt",
        AE_TRN = "ae_trn",
        AR_CUIT = "ar_cuit",
        AU_ABN = "au_abn",
        AU_ARN = "au_arn",
        BG_UIC = "bg_uic",
        BR_CNPJ = "br_cnpj",
        BR_CPF = "br_cpf",
        CA_BN = "ca_bn",
        CA_GST_HST = "ca_gst_hst",
        CA_PST_BC = "ca_pst_bc",
        CA_PST_MB = "ca_pst_mb",
        CA_PST_SK = "ca_pst_sk",
        CA_QST = "ca_qst",
        CH_UID = "ch_uid",
        CH_VAT = "ch_vat",
        CL_TIN = "cl_tin",
        CN_TIN = "cn_tin",
        CO_NIT = "co_nit",
        DE_STN = "de_stn",
        ES_CIF = "es_cif",
        EU_OSS_VAT = "eu_oss_vat",
        EU_VAT = "eu_vat",
        GB_VAT = "gb_vat",
        HK_BR = "hk_br",
        ID_NPWP = "id_npwp",
        IN_GST = "in_gst",
        JP_CN = "jp_cn",
        JP_RN = "jp_rn",
        JP_TRN = "jp_trn",
        KR_BRN = "kr_brn",
        MX_RFC = "mx_rfc",
        NO_VAT = "no_vat",
        NZ_GST = "nz_gst",
        SG_GST = "sg_gst",
        SG_UEN = "sg_uen",
        TH_VAT = "th_vat",
        TW_VAT = "tw_vat",
        UNKNOWN = "unknown",
        US_EIN = "us_ein",
        ZA_VAT = "za_vat",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerTaxId {
    #[serde(rename = "type")]
    pub type_: TaxIdType,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCustomerDetails {
    pub address: Option<Address>,
    pub address_source: Option<AddressSource>,
    pub ip_address: Option<String>,
    pub tax_ids: Vec<CustomerTaxId>,
    pub taxability_override: Option<TaxabilityOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionReversal {
    pub original_transaction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipFromDetails {
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jurisdiction {
    pub country: String,
    pub display_name: String,
    pub level: JurisdictionLevel,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRateDetails {
    pub display_name: String,
    pub percentage_decimal: String,
    pub tax_type: TaxType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxBreakdown {
    pub amount: i64,
    pub jurisdiction: Option<Jurisdiction>,
    pub sourcing: Option<TaxSourcing>,
    pub tax_rate_details: Option<TaxRateDetails>,
    pub taxability_reason: Option<TaxabilityReason>,
    pub taxable_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxShippingCost {
    pub amount: i64,
    pub amount_tax: i64,
    pub shipping_rate: Option<String>,
    pub tax_behavior: Option<TaxBehavior>,
    pub tax_breakdown: Option<Vec<TaxBreakdown>>,
    pub tax_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxLineItemReversal {
    pub original_line_item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionLineItem {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub amount_tax: i64,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub product: Option<String>,
    pub quantity: i64,
    pub reference: String,
    pub reversal: Option<TaxLineItemReversal>,
    pub tax_behavior: Option<TaxBehavior>,
    pub tax_code: Option<String>,
    #[serde(rename = "type")]
    pub type_: TaxTransactionType,
}

impl HasId for TaxTransactionLineItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransaction {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub currency: Currency,
    pub customer: Option<String>,
    pub customer_details: Option<TaxCustomerDetails>,
    pub line_items: Option<List<TaxTransactionLineItem>>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub posted_at: i64,
    pub reference: String,
    pub reversal: Option<TaxTransactionReversal>,
    pub ship_from_details: Option<ShipFromDetails>,
    pub shipping_cost: Option<TaxShippingCost>,
    pub tax_date: i64,
    #[serde(rename = "type")]
    pub type_: TaxTransactionType,
}

impl TaxTransaction {
    pub fn is_reversal(&self) -> bool {
        self.type_ == TaxTransactionType::REVERSAL
    }

    pub fn posted_at_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        stripe_core::time::from_unix(self.posted_at)
    }
}

impl HasId for TaxTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// Retrieve a transaction; only `expand` applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionParams {
    #[serde(flatten)]
    pub params: Params,
}

/// List the line items of a transaction. The transaction id travels in the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionListLineItemsParams {
    #[serde(flatten)]
    pub list: ListParams,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionCreateFromCalculationParams {
    #[serde(flatten)]
    pub params: Params,
    pub calculation: Option<String>,
    pub metadata: Option<Metadata>,
    pub posted_at: Option<i64>,
    pub reference: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionReversalLineItemParams {
    /// Negative: the amount being reversed.
    pub amount: Option<i64>,
    pub amount_tax: Option<i64>,
    pub metadata: Option<Metadata>,
    pub original_line_item: Option<String>,
    pub quantity: Option<i64>,
    pub reference: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionReversalShippingCostParams {
    pub amount: Option<i64>,
    pub amount_tax: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTransactionCreateReversalParams {
    #[serde(flatten)]
    pub params: Params,
    pub flat_amount: Option<i64>,
    pub line_items: Option<Vec<TaxTransactionReversalLineItemParams>>,
    pub metadata: Option<Metadata>,
    /// `full` or `partial`.
    pub mode: Option<String>,
    pub original_transaction: Option<String>,
    pub reference: Option<String>,
    pub shipping_cost: Option<TaxTransactionReversalShippingCostParams>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_transaction_round_trip() {
        let raw = json!({
            "id": "tax_1",
            "object": "tax.transaction",
            "created": 1700000000,
            "currency": "usd",
            "customer_details": {
                "address": {"country": "US", "postal_code": "10001", "state": "NY"},
                "address_source": "shipping",
                "tax_ids": [{"type": "eu_vat", "value": "DE123456789"}],
                "taxability_override": "none"
            },
            "livemode": false,
            "posted_at": 1700000100,
            "reference": "order_6735",
            "shipping_cost": {
                "amount": 500,
                "amount_tax": 44,
                "tax_behavior": "exclusive",
                "tax_breakdown": [{
                    "amount": 44,
                    "jurisdiction": {"country": "US", "display_name": "New York", "level": "state", "state": "NY"},
                    "sourcing": "destination",
                    "tax_rate_details": {"display_name": "Sales Tax", "percentage_decimal": "8.875", "tax_type": "sales_tax"},
                    "taxability_reason": "standard_rated",
                    "taxable_amount": 500
                }]
            },
            "tax_date": 1700000000,
            "type": "transaction"
        });
        let txn: TaxTransaction = assert_round_trip(&raw);
        assert!(!txn.is_reversal());
        let breakdown = &txn.shipping_cost.as_ref().unwrap().tax_breakdown.as_ref().unwrap()[0];
        assert_eq!(
            breakdown.tax_rate_details.as_ref().map(|r| r.percentage_decimal.as_str()),
            Some("8.875")
        );
        assert_eq!(txn.customer_details.as_ref().unwrap().tax_ids[0].type_, TaxIdType::EU_VAT);
    }

    #[test]
    fn test_unknown_tax_id_type() {
        let id: CustomerTaxId = serde_json::from_str(r#"{"type":"xx_new","value":"1"}"#).unwrap();
        assert!(!id.type_.is_known());
        assert_eq!(serde_json::to_string(&id).unwrap(), r#"{"type":"xx_new","value":"1"}"#);
    }

    #[test]
    fn test_reversal_params() {
        let params = TaxTransactionCreateReversalParams {
            mode: Some("partial".into()),
            original_transaction: Some("tax_1".into()),
            reference: Some("order_6735_refund".into()),
            line_items: Some(vec![TaxTransactionReversalLineItemParams {
                amount: Some(-1000),
                amount_tax: Some(-89),
                original_line_item: Some("tax_li_1".into()),
                reference: Some("line_1".into()),
                ..Default::default()
            }]),
            shipping_cost: Some(TaxTransactionReversalShippingCostParams {
                amount: Some(0),
                amount_tax: Some(0),
            }),
            ..Default::default()
        };
        assert_eq!(
            stripe_core::form::to_string(&params).unwrap(),
            "line_items[0][amount]=-1000&line_items[0][amount_tax]=-89&line_items[0][original_line_item]=tax_li_1&line_items[0][reference]=line_1&mode=partial&original_transaction=tax_1&reference=order_6735_refund&shipping_cost[amount]=0&shipping_cost[amount_tax]=0"
        );
    }

    #[test]
    fn test_from_calculation_params() {
        let mut params = TaxTransactionCreateFromCalculationParams {
            calculation: Some("taxcalc_1".into()),
            reference: Some("order_1".into()),
            ..Default::default()
        };
        params.params.add_expand("line_items");
        assert_eq!(
            stripe_core::form::to_string(&params).unwrap(),
            "expand[0]=line_items&calculation=taxcalc_1&reference=order_1"
        );
    }
}
