//! # stripe-resources
//!
//! Typed Stripe API resources and the parameter structs of their endpoints.
//!
//! Every resource decodes from the JSON the API returns and re-encodes to
//! the same shape; an unset optional field re-encodes as `null`. Every
//! parameter struct encodes to the bracketed form
//! body the API expects via [`stripe_core::form`].
//!
//! - Optional parameters are `Option`; `None` is left out of the body,
//!   while `Some(0)`, `Some(false)` and `Some(String::new())` are sent.
//! - Enumerated fields are open: unknown values decode and re-encode as-is.
//! - Fields that may be expanded are [`Expandable`](stripe_core::Expandable).
//! - Fields that hold one of several resource kinds are enums with an
//!   `Unknown` variant, e.g. [`PaymentSource`] and [`BalanceTransactionSource`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use stripe_resources::{Charge, ChargeParams};
//! use stripe_core::{Codec, Currency};
//!
//! let codec = Codec::default();
//! let charge: Charge = codec.decode(body)?;
//! if let Some(card) = charge.payment_method_details.as_ref().and_then(|d| d.card.as_ref()) {
//!     println!("{} ending {}", charge.id, card.last4.as_deref().unwrap_or("????"));
//! }
//!
//! let mut params = ChargeParams {
//!     amount: Some(2000),
//!     currency: Some(Currency::USD),
//!     ..Default::default()
//! };
//! params.set_source("tok_visa");
//! let body = codec.encode_params(&params)?;
//! ```

pub mod balance_transaction;
pub mod charge;
pub mod customer;
pub mod dispute;
pub mod event;
pub mod fees;
pub mod issuing;
pub mod payment_intent;
pub mod payment_source;
pub mod payout;
pub mod refund;
pub mod shared;
pub mod source;
pub mod tax_transaction;
pub mod topup;
pub mod transfer;

#[cfg(test)]
mod testing;

// Re-exports
pub use balance_transaction::{
    BalanceTransaction, BalanceTransactionListParams, BalanceTransactionParams,
    BalanceTransactionSource, ConnectCollectionTransfer, FeeDetail, ReserveTransaction,
    TaxDeductedAtSource,
};
pub use charge::{
    Charge, ChargeCaptureParams, ChargeListParams, ChargeParams, ChargePaymentMethodDetails,
    ChargeSearchParams, ChargeStatus, PaymentMethodDetailsType,
};
pub use customer::{Customer, CustomerCashBalanceTransaction, CustomerListParams, CustomerParams};
pub use dispute::{Dispute, DisputeListParams, DisputeParams, DisputeReason, DisputeStatus};
pub use event::{Event, EventData, EventListParams, EventRequest, EventType};
pub use fees::{ApplicationFee, FeeRefund};
pub use issuing::{IssuingAuthorization, IssuingDispute, IssuingTransaction};
pub use payment_intent::PaymentIntent;
pub use payment_source::{
    Account, BankAccount, Card, CardParams, PaymentSource, PaymentSourceParams, SourceParams,
};
pub use payout::{Payout, PayoutDestination, PayoutListParams, PayoutParams, PayoutStatus};
pub use refund::{Refund, RefundListParams, RefundParams};
pub use shared::{Address, DeletedObject, Metadata, ShippingDetails};
pub use source::{Source, SourceObjectParams, SourceType};
pub use tax_transaction::{TaxTransaction, TaxTransactionLineItem};
pub use topup::{Topup, TopupListParams, TopupParams};
pub use transfer::{Transfer, TransferListParams, TransferParams, TransferReversal};
