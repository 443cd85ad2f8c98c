use crate::dispatch::{DispatchTable, HandlerContext, HandlerError};
use crate::{BridgeConfig, Query, QueryFailure, Response, Result};
use platform::HostPlatform;
use tracing::{debug, info, warn};

/// Resolves queries against a fixed dispatch table.
///
/// Holds no mutable state, so a single bridge can be shared across threads
/// behind an `Arc` and called concurrently.
pub struct QueryBridge {
    table: DispatchTable,
    platform: Box<dyn HostPlatform>,
    strict_arguments: bool,
}

impl QueryBridge {
    pub fn new(table: DispatchTable, platform: Box<dyn HostPlatform>) -> Self {
        Self {
            table,
            platform,
            strict_arguments: false,
        }
    }

    /// Standard queries answered by the current host.
    pub fn for_current_host(config: &BridgeConfig) -> Result<Self> {
        let platform = platform::current()?;
        let table = DispatchTable::standard();
        info!(
            "Query bridge ready on {} ({} queries)",
            platform.name(),
            table.len()
        );
        Ok(Self::new(table, platform).with_strict_arguments(config.strict_arguments))
    }

    pub fn with_strict_arguments(mut self, strict: bool) -> Self {
        self.strict_arguments = strict;
        self
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn handle(&self, query: &Query) -> Response {
        let response = self.dispatch(query);
        debug!(query = query.name(), outcome = response.outcome(), "query answered");
        if let Response::Failure(failure) = &response {
            warn!(
                query = query.name(),
                kind = %failure.kind,
                "{}",
                failure.message
            );
        }
        response
    }

    fn dispatch(&self, query: &Query) -> Response {
        let Some(entry) = self.table.get(query.name()) else {
            return Response::Failure(QueryFailure::unimplemented(query.name()));
        };

        if self.strict_arguments {
            if let Some(unexpected) = query
                .arguments()
                .keys()
                .find(|key| !entry.accepts().contains(&key.as_str()))
            {
                return Response::Failure(QueryFailure::invalid_arguments(
                    query.name(),
                    format!("unexpected argument `{unexpected}`"),
                ));
            }
        }

        let ctx = HandlerContext {
            platform: self.platform.as_ref(),
            table: &self.table,
        };

        match entry.call(&ctx, query) {
            Ok(value) => Response::Success(value),
            Err(HandlerError::InvalidArguments(reason)) => {
                Response::Failure(QueryFailure::invalid_arguments(query.name(), reason))
            }
            Err(HandlerError::Host(err)) => {
                Response::Failure(QueryFailure::host_unavailable(query.name(), err))
            }
        }
    }
}
