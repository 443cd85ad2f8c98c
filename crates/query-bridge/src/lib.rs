//! Capability query bridge
//! Lets a host application ask the embedded platform layer for named facts
//! (such as the OS version) and get a typed answer or a typed failure back.

use thiserror::Error;

pub mod bridge;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod logging;
pub mod query;
pub mod response;
pub mod value;

pub use bridge::QueryBridge;
pub use channel::MethodChannel;
pub use config::{BridgeConfig, LogConfig, DEFAULT_CHANNEL_NAME};
pub use dispatch::{
    DispatchTable, DispatchTableBuilder, HandlerContext, HandlerError, HandlerResult,
};
pub use query::Query;
pub use response::{FailureKind, QueryFailure, Response};
pub use value::Value;

/// Errors raised while setting the bridge up or decoding channel traffic.
/// Query outcomes are never reported through this type; see [`Response`].
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Query name must not be empty")]
    EmptyQueryName,

    #[error("Query registered twice: {0}")]
    DuplicateQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed method call: {0}")]
    MalformedCall(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(#[from] platform::PlatformError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
