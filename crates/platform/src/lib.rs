//! Host platform facts.
//!
//! Do NOT put OS checks here beyond picking an adapter; platform specifics live
//! in the `platform-*` crates and are wrapped by `adapters`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod adapters;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Host fact unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse version: {0}")]
    Parse(String),

    #[error("Unsupported platform")]
    UnsupportedPlatform,
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Read-only source of facts about the host operating system.
///
/// Implementations must answer without side effects and without unbounded
/// blocking; anything expensive is memoized by the implementation.
pub trait HostPlatform: Send + Sync {
    /// Human readable platform name, e.g. `macOS`.
    fn name(&self) -> &str;

    /// Operating system version string as reported by the host.
    fn os_version(&self) -> Result<String>;

    fn family(&self) -> &str {
        std::env::consts::FAMILY
    }

    fn architecture(&self) -> &str {
        std::env::consts::ARCH
    }
}

/// Snapshot of everything a `HostPlatform` knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    pub platform: String,
    pub version: String,
    pub architecture: String,
    pub family: String,
}

impl PlatformFacts {
    pub fn collect(host: &dyn HostPlatform) -> Result<Self> {
        Ok(Self {
            platform: host.name().to_string(),
            version: host.os_version()?,
            architecture: host.architecture().to_string(),
            family: host.family().to_string(),
        })
    }

    /// `"<PlatformName> <VersionString>"`, e.g. `"iOS 17.2"`.
    pub fn display_version(&self) -> String {
        format!("{} {}", self.platform, self.version)
    }
}

/// Numeric prefix of a version string.
///
/// Trailing vendor suffixes are ignored, so `6.5.0-14-generic` parses as 6.5.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl OsVersion {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.trim().split('.').map(leading_number);

        let major = parts
            .next()
            .flatten()
            .ok_or_else(|| PlatformError::Parse(raw.to_string()))?;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);

        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn is_at_least(&self, major: u64, minor: u64) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn leading_number(part: &str) -> Option<u64> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}

/// Fixed facts, for hosts that are described rather than probed.
#[derive(Debug, Clone)]
pub struct FixedPlatform {
    name: String,
    version: Option<String>,
    architecture: String,
    family: String,
}

impl FixedPlatform {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            architecture: std::env::consts::ARCH.to_string(),
            family: std::env::consts::FAMILY.to_string(),
        }
    }

    /// A host whose version cannot be read.
    pub fn without_version(name: impl Into<String>) -> Self {
        Self {
            version: None,
            ..Self::new(name, "")
        }
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }
}

impl HostPlatform for FixedPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn os_version(&self) -> Result<String> {
        self.version
            .clone()
            .ok_or_else(|| PlatformError::Unavailable(format!("{} reports no version", self.name)))
    }

    fn family(&self) -> &str {
        &self.family
    }

    fn architecture(&self) -> &str {
        &self.architecture
    }
}

/// Factory function to create the fact source for the current platform
pub fn current() -> Result<Box<dyn HostPlatform>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(adapters::macos::MacosPlatform::new()))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(adapters::windows::WindowsPlatform::new()))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(adapters::linux::LinuxPlatform::new()))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        Err(PlatformError::UnsupportedPlatform)
    }
}

pub fn platform_name() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        platform_macos::PLATFORM_NAME
    }

    #[cfg(target_os = "windows")]
    {
        platform_windows::PLATFORM_NAME
    }

    #[cfg(target_os = "linux")]
    {
        platform_linux::PLATFORM_NAME
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        std::env::consts::OS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_versions() {
        let v = OsVersion::parse("14.2.1").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (14, 2, 1));
        assert_eq!(OsVersion::parse("17").unwrap().to_string(), "17.0.0");
    }

    #[test]
    fn ignores_vendor_suffix() {
        let v = OsVersion::parse("6.5.0-14-generic").unwrap();
        assert_eq!(v.to_string(), "6.5.0");

        let v = OsVersion::parse("10.0.19045.3803").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (10, 0, 19045));
    }

    #[test]
    fn rejects_non_numeric_major() {
        assert!(matches!(
            OsVersion::parse("Sonoma"),
            Err(PlatformError::Parse(_))
        ));
        assert!(OsVersion::parse("").is_err());
    }

    #[test]
    fn compares_major_then_minor() {
        let v = OsVersion::parse("14.2").unwrap();
        assert!(v.is_at_least(14, 0));
        assert!(v.is_at_least(14, 2));
        assert!(v.is_at_least(13, 9));
        assert!(!v.is_at_least(14, 3));
        assert!(!v.is_at_least(15, 0));
    }

    #[test]
    fn collects_fixed_facts() {
        let host = FixedPlatform::new("iOS", "17.2")
            .with_architecture("aarch64")
            .with_family("unix");
        let facts = PlatformFacts::collect(&host).unwrap();
        assert_eq!(facts.display_version(), "iOS 17.2");
        assert_eq!(facts.architecture, "aarch64");
    }

    #[test]
    fn missing_version_is_unavailable() {
        let host = FixedPlatform::without_version("iOS");
        assert!(matches!(
            PlatformFacts::collect(&host),
            Err(PlatformError::Unavailable(_))
        ));
    }

    #[cfg(any(target_os = "macos", target_os = "windows", target_os = "linux"))]
    #[test]
    fn current_host_reports_its_name() {
        let host = current().unwrap();
        assert_eq!(host.name(), platform_name());
    }
}
