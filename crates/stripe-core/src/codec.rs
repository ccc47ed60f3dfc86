//! # Codec
//!
//! The boundary an HTTP transport calls into: response bodies in, typed
//! values out; parameter structs in, form bodies out. Every step is
//! reported through a [`LeveledLog`].

use std::any::type_name;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ErrorEnvelope, ErrorType, WireError, WireResult};
use crate::form;
use crate::logger::{default_logger, LeveledLog};
use crate::params::{Params, RequestHeaders};
use crate::{log_debug, log_error};

const SAMPLE_LIMIT: usize = 500;

/// Decoder/encoder bound to a logger.
#[derive(Clone)]
pub struct Codec {
    logger: Arc<dyn LeveledLog>,
}

impl Codec {
    pub fn new(logger: Arc<dyn LeveledLog>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<dyn LeveledLog> {
        &self.logger
    }

    /// Decodes a successful response body.
    ///
    /// A body shaped like `{"error": {...}}` is returned as
    /// [`WireError::Api`] rather than decoded into `T`.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> WireResult<T> {
        log_debug!(self.logger, "Response body: {}", String::from_utf8_lossy(body));

        if let Some(err) = error_envelope(body) {
            log_error!(self.logger, "Request error from Stripe: {}", err);
            return Err(err.into());
        }

        serde_json::from_slice(body).map_err(|source| self.decode_failure::<T>(body, source))
    }

    /// Decodes a body together with its HTTP status. Statuses of 400 and
    /// above are always treated as errors.
    pub fn decode_response<T: DeserializeOwned>(&self, status: u16, body: &[u8]) -> WireResult<T> {
        if status < 400 {
            return self.decode(body);
        }

        log_debug!(self.logger, "Error response ({}): {}", status, String::from_utf8_lossy(body));
        let mut err = error_envelope(body).unwrap_or_else(|| ApiError {
            type_: ErrorType::API,
            message: body_sample(body),
            ..Default::default()
        });
        err.http_status = Some(status);
        log_error!(self.logger, "Request error from Stripe (status {}): {}", status, err);
        Err(err.into())
    }

    /// Form-encodes a parameter struct.
    pub fn encode_params<P: Serialize + ?Sized>(&self, params: &P) -> WireResult<String> {
        let body = form::to_string(params).map_err(|err| {
            log_error!(self.logger, "Failed to encode {}: {}", type_name::<P>(), err);
            WireError::from(err)
        })?;
        log_debug!(self.logger, "Request body: {}", body);
        Ok(body)
    }

    /// Header-only values the transport must send alongside the body.
    pub fn request_headers(&self, params: &Params) -> RequestHeaders {
        params.headers()
    }

    fn decode_failure<T>(&self, body: &[u8], source: serde_json::Error) -> WireError {
        let sample = body_sample(body);
        log_error!(
            self.logger,
            "Couldn't deserialize JSON (body sample: '{}'): {}",
            sample,
            source
        );
        tracing::debug!(target_type = type_name::<T>(), error = %source, "decode failed");
        WireError::Decode {
            target: type_name::<T>(),
            sample,
            source,
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(default_logger())
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

/// Decodes with the process-wide default logger.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> WireResult<T> {
    Codec::default().decode(body)
}

/// Encodes with the process-wide default logger.
pub fn encode_params<P: Serialize + ?Sized>(params: &P) -> WireResult<String> {
    Codec::default().encode_params(params)
}

/// Printable excerpt of a body: at most 500 characters, newlines escaped.
pub fn body_sample(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut sample: String = text.chars().take(SAMPLE_LIMIT).collect();
    if text.chars().count() > SAMPLE_LIMIT {
        sample.push_str(" ...");
    }
    sample.replace('\n', "\\n")
}

fn error_envelope(body: &[u8]) -> Option<ApiError> {
    serde_json::from_slice::<ErrorEnvelope>(body).ok()?.error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, LeveledLogger};
    use serde::Deserialize;
    use std::io::{self, Write};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Thing {
        id: String,
        amount: i64,
    }

    fn codec(level: Level) -> (Codec, Capture, Capture) {
        let out = Capture::default();
        let err = Capture::default();
        let logger = LeveledLogger::new(level)
            .with_stdout(out.clone())
            .with_stderr(err.clone());
        (Codec::new(Arc::new(logger)), out, err)
    }

    #[test]
    fn test_decode_success_logs_body_at_debug() {
        let (codec, out, err) = codec(Level::Debug);
        let thing: Thing = codec.decode(br#"{"id":"th_1","amount":5}"#).unwrap();
        assert_eq!(thing, Thing { id: "th_1".into(), amount: 5 });
        assert_eq!(out.text(), "[DEBUG] Response body: {\"id\":\"th_1\",\"amount\":5}\n");
        assert_eq!(err.text(), "");
    }

    #[test]
    fn test_decode_failure_logs_sample() {
        let (codec, _, err) = codec(Level::Error);
        let result = codec.decode::<Thing>(b"{\"id\":\n7}");
        let failure = result.unwrap_err();
        assert!(failure.is_decode());
        match &failure {
            WireError::Decode { target, sample, .. } => {
                assert!(target.ends_with("Thing"));
                assert_eq!(sample, "{\"id\":\\n7}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.text().starts_with("[ERROR] Couldn't deserialize JSON (body sample: '{\"id\":\\n7}'): "));
    }

    #[test]
    fn test_error_envelope_becomes_api_error() {
        let (codec, _, _) = codec(Level::Null);
        let body = br#"{"error":{"type":"card_error","code":"card_declined","message":"Your card was declined."}}"#;
        let failure = codec.decode::<Thing>(body).unwrap_err();
        let api = failure.api_error().unwrap();
        assert!(api.is_card_error());
        assert_eq!(api.message, "Your card was declined.");

        let failure = codec.decode_response::<Thing>(402, body).unwrap_err();
        assert_eq!(failure.status_code(), Some(402));
    }

    #[test]
    fn test_error_status_without_envelope() {
        let (codec, _, _) = codec(Level::Null);
        let failure = codec.decode_response::<Thing>(502, b"Bad gateway").unwrap_err();
        let api = failure.api_error().unwrap();
        assert_eq!(api.type_, ErrorType::API);
        assert_eq!(api.message, "Bad gateway");
        assert_eq!(api.http_status, Some(502));
    }

    #[test]
    fn test_encode_params_logs_body() {
        #[derive(Serialize)]
        struct Body {
            amount: i64,
            currency: &'static str,
        }

        let (codec, out, _) = codec(Level::Debug);
        let body = codec.encode_params(&Body { amount: 100, currency: "usd" }).unwrap();
        assert_eq!(body, "amount=100&currency=usd");
        assert_eq!(out.text(), "[DEBUG] Request body: amount=100&currency=usd\n");
    }

    #[test]
    fn test_encode_rejects_scalar() {
        let (codec, _, err) = codec(Level::Error);
        let failure = codec.encode_params(&5_i64).unwrap_err();
        assert!(matches!(failure, WireError::Encode(_)));
        assert!(err.text().starts_with("[ERROR] Failed to encode i64"));
    }

    #[test]
    fn test_body_sample_truncates() {
        let long = "x".repeat(600);
        let sample = body_sample(long.as_bytes());
        assert_eq!(sample.len(), 504);
        assert!(sample.ends_with(" ..."));
        assert_eq!(body_sample(b"a\nb"), "a\\nb");
    }
}
