//! # stripe-core
//!
//! Wire-level machinery shared by the stripe-wire resource types.
//!
//! This crate provides:
//! - `open_enum!` for string enumerations that tolerate unknown values
//! - `Expandable<T>` for fields returned as an id or a full object
//! - `UnknownObject` and helpers for discriminated unions
//! - A serde serializer producing bracketed form bodies
//! - `Params`, `ListParams` and friends embedded in every parameter struct
//! - `List<T>` and `SearchResult<T>` envelopes
//! - A leveled logger and the `Codec` that reports through it
//! - `WireError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use stripe_core::{Codec, Level, LeveledLogger};
//! use std::sync::Arc;
//!
//! let codec = Codec::new(Arc::new(LeveledLogger::new(Level::Debug)));
//!
//! // Decode a response body
//! let charge: Charge = codec.decode(body)?;
//!
//! // Encode a parameter struct
//! let form = codec.encode_params(&params)?;
//! ```

pub mod codec;
pub mod config;
pub mod currency;
pub mod enums;
pub mod error;
pub mod expandable;
pub mod form;
pub mod list;
pub mod logger;
pub mod params;
pub mod polymorphic;
pub mod time;

#[doc(hidden)]
pub use serde as __serde;
#[doc(hidden)]
pub use serde_json as __serde_json;

// Re-exports for convenience
pub use codec::Codec;
pub use config::{WireConfig, DEFAULT_API_VERSION};
pub use currency::Currency;
pub use error::{ApiError, DeclineCode, ErrorCode, ErrorEnvelope, ErrorType, WireError, WireResult};
pub use expandable::{Expandable, HasId};
pub use form::{FormError, FormValues};
pub use list::{List, ListMeta, SearchResult};
pub use logger::{default_logger, Level, LeveledLog, LeveledLogger, TracingLogger};
pub use params::{
    ExtraValues, Filters, ListParams, Params, RangeOrValue, RangeQuery, RequestHeaders,
    SearchParams,
};
pub use polymorphic::UnknownObject;

/// Key/value metadata attached to most objects.
pub type Metadata = std::collections::BTreeMap<String, String>;
