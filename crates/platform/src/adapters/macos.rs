use crate::{HostPlatform, Result};
use tracing::debug;

#[derive(Debug, Default)]
pub struct MacosPlatform;

impl MacosPlatform {
    pub fn new() -> Self {
        debug!("Using macOS fact source");
        Self
    }
}

impl HostPlatform for MacosPlatform {
    fn name(&self) -> &str {
        platform_macos::PLATFORM_NAME
    }

    fn os_version(&self) -> Result<String> {
        Ok(platform_macos::product_version()?)
    }
}
