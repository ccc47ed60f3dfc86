//! # Payment Intents
//!
//! A reduced payment intent: the fields charges, refunds and disputes link
//! back to. The client secret never appears in `Debug` output.

use std::fmt;

use serde::{Deserialize, Serialize};
use stripe_core::{open_enum, Currency, Expandable, HasId};

use crate::charge::Charge;
use crate::customer::Customer;
use crate::shared::{Metadata, ShippingDetails};

open_enum! {
    pub struct PaymentIntentStatus {
        CANCELED = "canceled",
        PROCESSING = "processing",
        REQUIRES_ACTION = "requires_action",
        REQUIRES_CAPTURE = "requires_capture",
        REQUIRES_CONFIRMATION = "requires_confirmation",
        REQUIRES_PAYMENT_METHOD = "requires_payment_method",
        SUCCEEDED = "succeeded",
    }
}

open_enum! {
    pub struct PaymentIntentCaptureMethod {
        AUTOMATIC = "automatic",
        AUTOMATIC_ASYNC = "automatic_async",
        MANUAL = "manual",
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentIntent {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub amount_capturable: i64,
    pub amount_received: i64,
    pub capture_method: Option<PaymentIntentCaptureMethod>,
    pub client_secret: Option<String>,
    pub created: i64,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    pub description: Option<String>,
    pub latest_charge: Option<Expandable<Charge>>,
    pub livemode: bool,
    pub metadata: Option<Metadata>,
    pub payment_method: Option<Expandable<stripe_core::UnknownObject>>,
    pub payment_method_types: Option<Vec<String>>,
    pub receipt_email: Option<String>,
    pub shipping: Option<ShippingDetails>,
    pub status: PaymentIntentStatus,
}

impl fmt::Debug for PaymentIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentIntent")
            .field("id", &self.id)
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("status", &self.status)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[redacted]"))
            .field("latest_charge", &self.latest_charge.as_ref().map(|c| c.id()))
            .finish_non_exhaustive()
    }
}

impl HasId for PaymentIntent {
    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> &str {
        &self.object
    }
}
