//! # Shared Types
//!
//! Addresses, shipping details and the deleted-object stub used across
//! several resources.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub use stripe_core::Metadata;

/// Postal address as returned on customers, charges and sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: Option<String>,
    /// Two-letter country code (ISO 3166-1 alpha-2).
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

/// Shipping information attached to a charge or payment intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingDetails {
    pub address: Option<Address>,
    pub carrier: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub tracking_number: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressParams {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

impl From<Address> for AddressParams {
    fn from(address: Address) -> Self {
        Self {
            city: address.city,
            country: address.country,
            line1: address.line1,
            line2: address.line2,
            postal_code: address.postal_code,
            state: address.state,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingDetailsParams {
    pub address: Option<AddressParams>,
    pub carrier: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub tracking_number: Option<String>,
}

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletedObject {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shipping_params_nest() {
        let params = ShippingDetailsParams {
            name: Some("Jenny Rosen".into()),
            address: Some(AddressParams {
                line1: Some("1234 Main Street".into()),
                postal_code: Some("94111".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let body = stripe_core::form::to_string(&params).unwrap();
        assert_eq!(
            body,
            "address[line1]=1234+Main+Street&address[postal_code]=94111&name=Jenny+Rosen"
        );
    }

    #[test]
    fn test_address_into_params() {
        let address: Address = serde_json::from_str(r#"{"city":"Berlin","country":"DE"}"#).unwrap();
        let params = AddressParams::from(address);
        assert_eq!(params.city.as_deref(), Some("Berlin"));
        assert_eq!(params.line1, None);
    }

    #[test]
    fn test_deleted_object() {
        let deleted: DeletedObject =
            serde_json::from_str(r#"{"id":"cus_1","object":"customer","deleted":true}"#).unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.object, "customer");
    }
}
