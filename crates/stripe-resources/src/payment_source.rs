//! # Payment Sources
//!
//! Cards, bank accounts and connected accounts attached to customers, plus
//! the [`PaymentSource`] union returned wherever any of them may appear.
//!
//! [`SourceParams`] describes the payment source of a new charge or
//! attachment. A token is sent as `source=tok_...` (or
//! `external_account=tok_...` for a connected account); raw card details are
//! sent under `source[...]` with `source[object]=card`.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use stripe_core::{open_enum, object_union, Currency, Expandable, HasId, ListParams, Params};

use crate::customer::Customer;
use crate::shared::{AddressParams, Metadata};
use crate::source::Source;

open_enum! {
    /// Brand of a card object (display form).
    pub struct CardBrand {
        AMERICAN_EXPRESS = "American Express",
        DINERS_CLUB = "Diners Club",
        DISCOVER = "Discover",
        JCB = "JCB",
        MASTER_CARD = "MasterCard",
        UNION_PAY = "UnionPay",
        UNKNOWN = "Unknown",
        VISA = "Visa",
    }
}

open_enum! {
    pub struct CardFunding {
        CREDIT = "credit",
        DEBIT = "debit",
        PREPAID = "prepaid",
        UNKNOWN = "unknown",
    }
}

open_enum! {
    /// Result of an address or CVC check.
    pub struct CardCheck {
        FAIL = "fail",
        PASS = "pass",
        UNAVAILABLE = "unavailable",
        UNCHECKED = "unchecked",
    }
}

open_enum! {
    pub struct CardTokenizationMethod {
        ANDROID_PAY = "android_pay",
        APPLE_PAY = "apple_pay",
    }
}

open_enum! {
    pub struct BankAccountAccountHolderType {
        COMPANY = "company",
        INDIVIDUAL = "individual",
    }
}

open_enum! {
    pub struct BankAccountStatus {
        ERRORED = "errored",
        NEW = "new",
        VALIDATED = "validated",
        VERIFICATION_FAILED = "verification_failed",
        VERIFIED = "verified",
    }
}

open_enum! {
    pub struct AccountType {
        CUSTOM = "custom",
        EXPRESS = "express",
        NONE = "none",
        STANDARD = "standard",
    }
}

open_enum! {
    pub struct AccountBusinessType {
        COMPANY = "company",
        GOVERNMENT_ENTITY = "government_entity",
        INDIVIDUAL = "individual",
        NON_PROFIT = "non_profit",
    }
}

/// A connected account, reduced to the fields other resources reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub object: String,
    pub business_type: Option<AccountBusinessType>,
    pub charges_enabled: bool,
    pub country: Option<String>,
    pub created: Option<i64>,
    pub default_currency: Option<Currency>,
    pub details_submitted: bool,
    pub email: Option<String>,
    pub metadata: Option<Metadata>,
    pub payouts_enabled: bool,
    #[serde(rename = "type")]
    pub type_: Option<AccountType>,
}

impl HasId for Account {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// A card attached to a customer or a connected account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub id: String,
    pub object: String,
    pub account: Option<Expandable<Account>>,
    pub address_city: Option<String>,
    pub address_country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line1_check: Option<CardCheck>,
    pub address_line2: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_zip_check: Option<CardCheck>,
    pub brand: CardBrand,
    pub country: Option<String>,
    pub currency: Option<Currency>,
    pub customer: Option<Expandable<Customer>>,
    pub cvc_check: Option<CardCheck>,
    pub default_for_currency: Option<bool>,
    pub deleted: Option<bool>,
    pub dynamic_last4: Option<String>,
    pub exp_month: i64,
    pub exp_year: i64,
    pub fingerprint: Option<String>,
    pub funding: CardFunding,
    pub last4: String,
    pub metadata: Option<Metadata>,
    pub name: Option<String>,
    pub tokenization_method: Option<CardTokenizationMethod>,
}

impl HasId for Card {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

/// A bank account attached to a customer or used for payouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    pub id: String,
    pub object: String,
    pub account: Option<Expandable<Account>>,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<BankAccountAccountHolderType>,
    pub account_type: Option<String>,
    pub bank_name: Option<String>,
    pub country: String,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    pub default_for_currency: Option<bool>,
    pub deleted: Option<bool>,
    pub fingerprint: Option<String>,
    pub last4: String,
    pub metadata: Option<Metadata>,
    pub routing_number: Option<String>,
    pub status: BankAccountStatus,
}

impl HasId for BankAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}

object_union! {
    /// Anything that can fund a charge.
    pub enum PaymentSource {
        Account(Account) = "account",
        BankAccount(BankAccount) = "bank_account",
        Card(Card) = "card",
        Source(Source) = "source",
    }
}

impl PaymentSource {
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            PaymentSource::Card(card) => Some(card.as_ref()),
            _ => None,
        }
    }

    pub fn as_bank_account(&self) -> Option<&BankAccount> {
        match self {
            PaymentSource::BankAccount(account) => Some(account.as_ref()),
            _ => None,
        }
    }
}

/// Raw card details (or a card token) for a new payment source.
///
/// Path-only values such as the owning customer are not part of the body.
/// `account` only switches a token between `source` and `external_account`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardParams {
    #[serde(flatten)]
    pub params: Params,
    pub account: Option<String>,
    pub token: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub address_city: Option<String>,
    pub address_country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub currency: Option<String>,
    pub cvc: Option<String>,
    pub default_for_currency: Option<bool>,
    pub exp_month: Option<String>,
    pub exp_year: Option<String>,
    pub metadata: Option<Metadata>,
    pub name: Option<String>,
    pub number: Option<String>,
}

/// Card fields as they appear under `source[...]`.
#[skip_serializing_none]
#[derive(Serialize)]
struct CardSourceFields<'a> {
    object: Option<&'a str>,
    number: Option<&'a str>,
    cvc: Option<&'a str>,
    currency: Option<&'a str>,
    exp_month: Option<&'a str>,
    exp_year: Option<&'a str>,
    name: Option<&'a str>,
    account_holder_name: Option<&'a str>,
    account_holder_type: Option<&'a str>,
    address_city: Option<&'a str>,
    address_country: Option<&'a str>,
    address_line1: Option<&'a str>,
    address_line2: Option<&'a str>,
    address_state: Option<&'a str>,
    address_zip: Option<&'a str>,
}

impl<'a> CardSourceFields<'a> {
    fn new(card: &'a CardParams) -> Self {
        Self {
            object: card.number.as_ref().map(|_| "card"),
            number: card.number.as_deref(),
            cvc: card.cvc.as_deref(),
            currency: card.currency.as_deref(),
            exp_month: card.exp_month.as_deref(),
            exp_year: card.exp_year.as_deref(),
            name: card.name.as_deref(),
            account_holder_name: card.account_holder_name.as_deref(),
            account_holder_type: card.account_holder_type.as_deref(),
            address_city: card.address_city.as_deref(),
            address_country: card.address_country.as_deref(),
            address_line1: card.address_line1.as_deref(),
            address_line2: card.address_line2.as_deref(),
            address_state: card.address_state.as_deref(),
            address_zip: card.address_zip.as_deref(),
        }
    }

    fn is_empty(&self) -> bool {
        [
            self.number,
            self.cvc,
            self.currency,
            self.exp_month,
            self.exp_year,
            self.name,
            self.account_holder_name,
            self.account_holder_type,
            self.address_city,
            self.address_country,
            self.address_line1,
            self.address_line2,
            self.address_state,
            self.address_zip,
        ]
        .iter()
        .all(Option::is_none)
    }
}

impl Serialize for CardParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.params.expand.is_empty() {
            map.serialize_entry("expand", &self.params.expand)?;
        }
        for (key, value) in self.params.extra.iter() {
            map.serialize_entry(key, value)?;
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry("metadata", metadata)?;
        }
        if let Some(default) = self.default_for_currency {
            map.serialize_entry("default_for_currency", &default)?;
        }
        if let Some(token) = &self.token {
            let key = if self.account.is_some() {
                "external_account"
            } else {
                "source"
            };
            map.serialize_entry(key, token)?;
        }
        let card = CardSourceFields::new(self);
        if !card.is_empty() {
            map.serialize_entry("source", &card)?;
        }
        map.end()
    }
}

/// Payment source for a charge or a new customer source: a token/id or
/// raw card details. Embedded with `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceParams {
    Token(String),
    Card(Box<CardParams>),
}

impl From<&str> for SourceParams {
    fn from(token: &str) -> Self {
        SourceParams::Token(token.to_owned())
    }
}

impl From<CardParams> for SourceParams {
    fn from(card: CardParams) -> Self {
        SourceParams::Card(Box::new(card))
    }
}

impl Serialize for SourceParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SourceParams::Token(token) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("source", token)?;
                map.end()
            }
            SourceParams::Card(card) => card.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SourceParams {
    /// Reads `"source": "tok_..."` or `"source": { card fields }`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        match map.remove("source") {
            Some(Value::String(token)) => Ok(SourceParams::Token(token)),
            Some(Value::Object(card)) => CardParams::deserialize(Value::Object(card))
                .map(|card| SourceParams::Card(Box::new(card)))
                .map_err(de::Error::custom),
            _ => Err(de::Error::missing_field("source")),
        }
    }
}

/// Attach a payment source to a customer, or update one in place.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSourceParams {
    #[serde(flatten)]
    pub params: Params,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub address_city: Option<String>,
    pub address_country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub exp_month: Option<String>,
    pub exp_year: Option<String>,
    pub metadata: Option<Metadata>,
    pub name: Option<String>,
    pub owner: Option<PaymentSourceOwnerParams>,
    #[serde(flatten)]
    pub source: Option<SourceParams>,
    pub validate: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSourceOwnerParams {
    pub address: Option<AddressParams>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Verify a bank account with the two microdeposit amounts.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSourceVerifyParams {
    #[serde(flatten)]
    pub params: Params,
    pub amounts: Option<[i64; 2]>,
    pub values: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSourceListParams {
    #[serde(flatten)]
    pub list: ListParams,
    /// Restrict to `card` or `bank_account`.
    pub object: Option<String>,
}
