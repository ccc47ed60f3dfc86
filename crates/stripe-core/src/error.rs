//! # Wire Error Types
//!
//! Typed error handling for the encode/decode boundary.
//! All codec operations return `Result<T, WireError>`.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::form::FormError;
use crate::open_enum;

/// Core error type for all codec operations
#[derive(Debug, Error)]
pub enum WireError {
    /// Response body could not be decoded into the requested type
    #[error("Couldn't deserialize {target} (body sample: '{sample}'): {source}")]
    Decode {
        target: &'static str,
        sample: String,
        source: serde_json::Error,
    },

    /// A decoded value could not be written back out as JSON
    #[error("Couldn't serialize {target}: {source}")]
    Serialize {
        target: &'static str,
        source: serde_json::Error,
    },

    /// Parameter struct could not be form encoded
    #[error("Form encoding error: {0}")]
    Encode(#[from] FormError),

    /// The body was an error object returned by the API
    #[error("Stripe API error: {0}")]
    Api(Box<ApiError>),

    /// Configuration errors (bad log level, malformed key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading configuration or input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// Returns true if this error came from a malformed body
    pub fn is_decode(&self) -> bool {
        matches!(self, WireError::Decode { .. })
    }

    /// The remote error object, when the body carried one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            WireError::Api(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// HTTP status attached to an API error, if any
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().and_then(|err| err.http_status)
    }
}

impl From<ApiError> for WireError {
    fn from(err: ApiError) -> Self {
        WireError::Api(Box::new(err))
    }
}

/// Result type alias for codec operations
pub type WireResult<T> = Result<T, WireError>;

open_enum! {
    /// Category of an API error.
    pub struct ErrorType {
        API = "api_error",
        CARD = "card_error",
        IDEMPOTENCY = "idempotency_error",
        INVALID_REQUEST = "invalid_request_error",
    }
}

open_enum! {
    /// Machine-readable reason for an API error.
    pub struct ErrorCode {
        ACCOUNT_CLOSED = "account_closed",
        AMOUNT_TOO_LARGE = "amount_too_large",
        AMOUNT_TOO_SMALL = "amount_too_small",
        API_KEY_EXPIRED = "api_key_expired",
        AUTHENTICATION_REQUIRED = "authentication_required",
        BALANCE_INSUFFICIENT = "balance_insufficient",
        BANK_ACCOUNT_DECLINED = "bank_account_declined",
        BANK_ACCOUNT_UNUSABLE = "bank_account_unusable",
        CARD_DECLINE_RATE_LIMIT_EXCEEDED = "card_decline_rate_limit_exceeded",
        CARD_DECLINED = "card_declined",
        CHARGE_ALREADY_CAPTURED = "charge_already_captured",
        CHARGE_ALREADY_REFUNDED = "charge_already_refunded",
        CHARGE_DISPUTED = "charge_disputed",
        CHARGE_EXPIRED_FOR_CAPTURE = "charge_expired_for_capture",
        COUNTRY_UNSUPPORTED = "country_unsupported",
        EMAIL_INVALID = "email_invalid",
        EXPIRED_CARD = "expired_card",
        IDEMPOTENCY_KEY_IN_USE = "idempotency_key_in_use",
        INCORRECT_CVC = "incorrect_cvc",
        INCORRECT_NUMBER = "incorrect_number",
        INCORRECT_ZIP = "incorrect_zip",
        INSUFFICIENT_FUNDS = "insufficient_funds",
        INVALID_CHARGE_AMOUNT = "invalid_charge_amount",
        INVALID_CVC = "invalid_cvc",
        INVALID_EXPIRY_MONTH = "invalid_expiry_month",
        INVALID_EXPIRY_YEAR = "invalid_expiry_year",
        INVALID_NUMBER = "invalid_number",
        LIVEMODE_MISMATCH = "livemode_mismatch",
        LOCK_TIMEOUT = "lock_timeout",
        MISSING = "missing",
        PARAMETER_INVALID_EMPTY = "parameter_invalid_empty",
        PARAMETER_INVALID_INTEGER = "parameter_invalid_integer",
        PARAMETER_INVALID_STRING_EMPTY = "parameter_invalid_string_empty",
        PARAMETER_MISSING = "parameter_missing",
        PARAMETER_UNKNOWN = "parameter_unknown",
        PARAMETERS_EXCLUSIVE = "parameters_exclusive",
        PAYOUTS_NOT_ALLOWED = "payouts_not_allowed",
        PROCESSING_ERROR = "processing_error",
        RATE_LIMIT = "rate_limit",
        RESOURCE_ALREADY_EXISTS = "resource_already_exists",
        RESOURCE_MISSING = "resource_missing",
        SECRET_KEY_REQUIRED = "secret_key_required",
        TAX_ID_INVALID = "tax_id_invalid",
        TESTMODE_CHARGES_ONLY = "testmode_charges_only",
        TLS_VERSION_UNSUPPORTED = "tls_version_unsupported",
        TOKEN_ALREADY_USED = "token_already_used",
        TRANSFERS_NOT_ALLOWED = "transfers_not_allowed",
        URL_INVALID = "url_invalid",
    }
}

open_enum! {
    /// Issuer's reason for declining a card.
    pub struct DeclineCode {
        AUTHENTICATION_REQUIRED = "authentication_required",
        CALL_ISSUER = "call_issuer",
        CARD_NOT_SUPPORTED = "card_not_supported",
        CARD_VELOCITY_EXCEEDED = "card_velocity_exceeded",
        DO_NOT_HONOR = "do_not_honor",
        DO_NOT_TRY_AGAIN = "do_not_try_again",
        EXPIRED_CARD = "expired_card",
        FRAUDULENT = "fraudulent",
        GENERIC_DECLINE = "generic_decline",
        INCORRECT_CVC = "incorrect_cvc",
        INSUFFICIENT_FUNDS = "insufficient_funds",
        INVALID_ACCOUNT = "invalid_account",
        LOST_CARD = "lost_card",
        PICKUP_CARD = "pickup_card",
        PROCESSING_ERROR = "processing_error",
        STOLEN_CARD = "stolen_card",
        TRY_AGAIN_LATER = "try_again_later",
    }
}

/// Error object returned by the API in the `error` key of a failed response.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub type_: ErrorType,
    pub message: String,
    pub code: Option<ErrorCode>,
    pub decline_code: Option<DeclineCode>,
    pub param: Option<String>,
    pub doc_url: Option<String>,
    /// Charge that failed, for card errors.
    pub charge: Option<String>,
    pub payment_method_type: Option<String>,
    pub request_log_url: Option<String>,

    /// Filled from the response, not the body.
    pub request_id: Option<String>,
    #[serde(rename = "status")]
    pub http_status: Option<u16>,
}

impl ApiError {
    pub fn is_card_error(&self) -> bool {
        self.type_ == ErrorType::CARD
    }

    pub fn is_invalid_request(&self) -> bool {
        self.type_ == ErrorType::INVALID_REQUEST
    }

    pub fn is_idempotency_error(&self) -> bool {
        self.type_ == ErrorType::IDEMPOTENCY
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// `{"error": {...}}` wrapper around [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ApiError>,
}
