//! macOS version facts, read from `NSProcessInfo`.

pub const PLATFORM_NAME: &str = "macOS";

/// Product version such as `14.2.1`, as `sw_vers` would print it.
#[cfg(target_os = "macos")]
pub fn product_version() -> std::io::Result<String> {
    use objc2_foundation::NSProcessInfo;

    let info = NSProcessInfo::processInfo();
    #[allow(unused_unsafe)]
    let version = unsafe { info.operatingSystemVersion() };

    let component = |n: isize| {
        u64::try_from(n).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("negative version component {n}"),
            )
        })
    };

    Ok(format_version(
        component(version.majorVersion)?,
        component(version.minorVersion)?,
        component(version.patchVersion)?,
    ))
}

/// macOS omits a zero patch level: `14.2`, not `14.2.0`.
pub fn format_version(major: u64, minor: u64, patch: u64) -> String {
    if patch == 0 {
        format!("{major}.{minor}")
    } else {
        format!("{major}.{minor}.{patch}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_zero_patch() {
        assert_eq!(format_version(14, 2, 0), "14.2");
        assert_eq!(format_version(11, 0, 0), "11.0");
    }

    #[test]
    fn keeps_patch_level() {
        assert_eq!(format_version(14, 2, 1), "14.2.1");
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn reads_host_version() {
        let version = product_version().unwrap();
        assert!(version.starts_with(|c: char| c.is_ascii_digit()), "{version}");
    }
}
