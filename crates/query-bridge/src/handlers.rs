//! Built-in queries answered from host platform facts.

use crate::dispatch::{Handler, HandlerContext, HandlerError, HandlerResult};
use crate::{Query, Value};
use platform::{OsVersion, PlatformFacts};
use std::collections::BTreeMap;

pub const GET_PLATFORM_VERSION: &str = "getPlatformVersion";
pub const GET_PLATFORM_NAME: &str = "getPlatformName";
pub const GET_OS_VERSION: &str = "getOsVersion";
pub const GET_ARCHITECTURE: &str = "getArchitecture";
pub const GET_DEVICE_INFO: &str = "getDeviceInfo";
pub const IS_OS_VERSION_AT_LEAST: &str = "isOsVersionAtLeast";
pub const LIST_QUERIES: &str = "listQueries";

const NO_ARGUMENTS: &[&str] = &[];

type Registration = (&'static str, &'static [&'static str], Box<Handler>);

pub(crate) fn standard() -> Vec<Registration> {
    vec![
        entry(GET_PLATFORM_VERSION, NO_ARGUMENTS, platform_version),
        entry(GET_PLATFORM_NAME, NO_ARGUMENTS, platform_name),
        entry(GET_OS_VERSION, NO_ARGUMENTS, os_version),
        entry(GET_ARCHITECTURE, NO_ARGUMENTS, architecture),
        entry(GET_DEVICE_INFO, NO_ARGUMENTS, device_info),
        entry(IS_OS_VERSION_AT_LEAST, &["major", "minor"], os_version_at_least),
        entry(LIST_QUERIES, NO_ARGUMENTS, list_queries),
    ]
}

fn entry<F>(name: &'static str, accepts: &'static [&'static str], handler: F) -> Registration
where
    F: Fn(&HandlerContext<'_>, &Query) -> HandlerResult + Send + Sync + 'static,
{
    let handler: Box<Handler> = Box::new(handler);
    (name, accepts, handler)
}

/// `"<PlatformName> <VersionString>"`
fn platform_version(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    let version = ctx.platform.os_version()?;
    Ok(Value::String(format!("{} {}", ctx.platform.name(), version)))
}

fn platform_name(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    Ok(Value::from(ctx.platform.name()))
}

fn os_version(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    Ok(Value::String(ctx.platform.os_version()?))
}

fn architecture(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    Ok(Value::from(ctx.platform.architecture()))
}

fn device_info(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    let facts = PlatformFacts::collect(ctx.platform)?;
    let mut info = BTreeMap::new();
    info.insert("platform".to_string(), Value::String(facts.platform));
    info.insert("version".to_string(), Value::String(facts.version));
    info.insert("architecture".to_string(), Value::String(facts.architecture));
    info.insert("family".to_string(), Value::String(facts.family));
    Ok(Value::Map(info))
}

fn os_version_at_least(ctx: &HandlerContext<'_>, query: &Query) -> HandlerResult {
    let major = required_u64(query, "major")?;
    let minor = optional_u64(query, "minor")?.unwrap_or(0);

    let version = OsVersion::parse(&ctx.platform.os_version()?)?;
    Ok(Value::Bool(version.is_at_least(major, minor)))
}

fn list_queries(ctx: &HandlerContext<'_>, _query: &Query) -> HandlerResult {
    let names = ctx
        .table
        .names()
        .map(|name| (name.to_string(), Value::Bool(true)))
        .collect();
    Ok(Value::Map(names))
}

fn required_u64(query: &Query, key: &str) -> Result<u64, HandlerError> {
    optional_u64(query, key)?
        .ok_or_else(|| HandlerError::InvalidArguments(format!("missing required argument `{key}`")))
}

fn optional_u64(query: &Query, key: &str) -> Result<Option<u64>, HandlerError> {
    let Some(value) = query.argument(key) else {
        return Ok(None);
    };

    let n = value.as_i64().ok_or_else(|| {
        HandlerError::InvalidArguments(format!(
            "`{key}` must be an integer, got {}",
            value.type_name()
        ))
    })?;

    u64::try_from(n)
        .map(Some)
        .map_err(|_| HandlerError::InvalidArguments(format!("`{key}` must not be negative")))
}
