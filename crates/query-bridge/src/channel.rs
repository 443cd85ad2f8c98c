//! JSON method-channel front end.
//!
//! A call is `{"method": "<name>", "args": <map|null>}`. Replies are envelopes:
//! `[<value>]` on success, `["<code>", "<message>", <details>]` on failure,
//! where `details` is the requested query name or `null` when the call could
//! not be decoded far enough to have one.

use crate::response::FailureKind;
use crate::{BridgeConfig, BridgeError, Query, QueryBridge, Response, Result, Value};
use serde::Deserialize;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct MethodCall {
    method: String,
    #[serde(default)]
    args: Option<Value>,
}

pub struct MethodChannel {
    name: String,
    bridge: Arc<QueryBridge>,
}

impl MethodChannel {
    pub fn new(name: impl Into<String>, bridge: Arc<QueryBridge>) -> Self {
        Self {
            name: name.into(),
            bridge,
        }
    }

    pub fn from_config(config: &BridgeConfig, bridge: Arc<QueryBridge>) -> Self {
        Self::new(config.channel_name.clone(), bridge)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Answers one encoded call. Never fails: decoding problems come back as
    /// a `MalformedCall` envelope.
    pub fn invoke(&self, message: &[u8]) -> Vec<u8> {
        let call_id = Uuid::new_v4();
        let _span = info_span!("method_call", channel = %self.name, %call_id).entered();

        let envelope = match decode_call(message) {
            Ok(query) => encode_response(&self.bridge.handle(&query)),
            Err(err) => {
                warn!("Rejected malformed call: {err}");
                malformed_envelope(&err)
            }
        };

        match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("Failed to encode reply envelope: {err}");
                malformed_envelope(&BridgeError::Json(err)).to_string().into_bytes()
            }
        }
    }

    pub fn invoke_str(&self, message: &str) -> String {
        String::from_utf8_lossy(&self.invoke(message.as_bytes())).into_owned()
    }

    /// Answers one call per non-blank input line, one envelope per output
    /// line, until `input` is exhausted. Returns the number of calls answered.
    pub fn serve_lines<R, W>(&self, input: R, mut output: W) -> io::Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut answered = 0;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            output.write_all(&self.invoke(line.as_bytes()))?;
            output.write_all(b"\n")?;
            output.flush()?;
            answered += 1;
        }
        debug!("input closed after {answered} calls");
        Ok(answered)
    }
}

pub fn decode_call(message: &[u8]) -> Result<Query> {
    let call: MethodCall = serde_json::from_slice(message)?;
    if call.method.is_empty() {
        return Err(BridgeError::MalformedCall("method name is empty".into()));
    }

    match call.args {
        None | Some(Value::Null) => Query::new(call.method),
        Some(Value::Map(arguments)) => Query::with_arguments(call.method, arguments),
        Some(other) => Err(BridgeError::MalformedCall(format!(
            "arguments for {} must be a map, got {}",
            call.method,
            other.type_name()
        ))),
    }
}

pub fn encode_response(response: &Response) -> serde_json::Value {
    match response {
        Response::Success(value) => json!([value]),
        Response::Failure(failure) => {
            json!([failure.kind.as_str(), failure.message, failure.query])
        }
    }
}

fn malformed_envelope(err: &BridgeError) -> serde_json::Value {
    json!([FailureKind::MalformedCall.as_str(), err.to_string(), null])
}
