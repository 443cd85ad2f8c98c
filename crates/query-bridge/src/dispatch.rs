//! The fixed name → handler table consulted by the bridge.

use crate::{handlers, BridgeError, Query, Result, Value};
use platform::{HostPlatform, PlatformError};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Reasons a registered handler declines to answer.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Host(#[from] PlatformError),
}

pub type HandlerResult = std::result::Result<Value, HandlerError>;

/// Synchronous, side-effect-free answer for one query name.
pub type Handler = dyn Fn(&HandlerContext<'_>, &Query) -> HandlerResult + Send + Sync;

/// What a handler may read while answering.
pub struct HandlerContext<'a> {
    pub platform: &'a dyn HostPlatform,
    pub table: &'a DispatchTable,
}

pub struct QueryEntry {
    accepts: &'static [&'static str],
    handler: Box<Handler>,
}

impl QueryEntry {
    /// Argument names this query understands.
    pub fn accepts(&self) -> &'static [&'static str] {
        self.accepts
    }

    pub fn call(&self, ctx: &HandlerContext<'_>, query: &Query) -> HandlerResult {
        (self.handler)(ctx, query)
    }
}

/// Immutable once built; every name maps to at most one handler.
pub struct DispatchTable {
    entries: BTreeMap<String, QueryEntry>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::default()
    }

    /// The table with every built-in query registered.
    pub fn standard() -> Self {
        DispatchTableBuilder::standard().build()
    }

    pub fn get(&self, name: &str) -> Option<&QueryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[derive(Default)]
pub struct DispatchTableBuilder {
    entries: BTreeMap<String, QueryEntry>,
}

impl DispatchTableBuilder {
    /// Starts from the built-in queries so callers can add their own.
    pub fn standard() -> Self {
        let mut builder = Self::default();
        for (name, accepts, handler) in handlers::standard() {
            builder.insert(name, accepts, handler);
        }
        builder
    }

    pub fn register<F>(
        mut self,
        name: &str,
        accepts: &'static [&'static str],
        handler: F,
    ) -> Result<Self>
    where
        F: Fn(&HandlerContext<'_>, &Query) -> HandlerResult + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(BridgeError::EmptyQueryName);
        }
        if self.entries.contains_key(name) {
            return Err(BridgeError::DuplicateQuery(name.to_string()));
        }
        self.insert(name, accepts, Box::new(handler));
        Ok(self)
    }

    fn insert(&mut self, name: &str, accepts: &'static [&'static str], handler: Box<Handler>) {
        self.entries
            .insert(name.to_string(), QueryEntry { accepts, handler });
    }

    pub fn build(self) -> DispatchTable {
        DispatchTable {
            entries: self.entries,
        }
    }
}
