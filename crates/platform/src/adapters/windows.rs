use crate::{HostPlatform, Result};
use tracing::debug;

#[derive(Debug, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        debug!("Using Windows fact source");
        Self
    }
}

impl HostPlatform for WindowsPlatform {
    fn name(&self) -> &str {
        platform_windows::PLATFORM_NAME
    }

    fn os_version(&self) -> Result<String> {
        Ok(platform_windows::os_version()?)
    }
}
