//! # Commands
//!
//! The `decode` and `encode` subcommands, separated from argument parsing
//! so they can be driven from tests.

use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use stripe_core::{Codec, WireError};
use tracing::{debug, info};

use crate::registry;

/// Reads a body from a file, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("failed to read stdin")?;
            Ok(body)
        }
    }
}

/// Decodes `body` as `kind` and renders a one-line summary.
///
/// An API error body is not a failure of the command: it is rendered as
/// `error <type> <code>: <message>`.
pub fn decode(codec: &Codec, kind: &str, body: &[u8]) -> Result<String> {
    let decode_fn = registry::resource(kind).ok_or_else(|| {
        anyhow!(
            "unknown resource kind '{kind}' (expected one of: {})",
            registry::resource_names().collect::<Vec<_>>().join(", ")
        )
    })?;

    debug!(kind, bytes = body.len(), "decoding");

    match decode_fn(codec, body) {
        Ok(summary) => {
            info!(object = %summary.object, id = %summary.id, "decoded");
            Ok(summary.to_string())
        }
        Err(WireError::Api(err)) => {
            let code = err.code.as_ref().map(|c| c.as_str()).unwrap_or("-");
            Ok(format!("error {} {}: {}", err.type_, code, err.message))
        }
        Err(err) => Err(err).with_context(|| format!("failed to decode {kind}")),
    }
}

/// Reads JSON parameters for `kind` and renders the form body.
pub fn encode(codec: &Codec, kind: &str, body: &[u8]) -> Result<String> {
    let encode_fn = registry::params(kind).ok_or_else(|| {
        anyhow!(
            "unknown params kind '{kind}' (expected one of: {})",
            registry::params_names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let form = encode_fn(codec, body).with_context(|| format!("failed to encode {kind} params"))?;
    info!(kind, bytes = form.len(), "encoded");
    Ok(form)
}
