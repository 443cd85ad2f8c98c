use crate::{HostPlatform, Result};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LinuxPlatform;

impl LinuxPlatform {
    pub fn new() -> Self {
        debug!("Using Linux fact source");
        Self
    }
}

impl HostPlatform for LinuxPlatform {
    fn name(&self) -> &str {
        platform_linux::PLATFORM_NAME
    }

    fn os_version(&self) -> Result<String> {
        Ok(platform_linux::kernel_release()?)
    }
}
