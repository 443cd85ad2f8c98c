//! Linux version facts from procfs.

use std::fs;
use std::io;

pub const PLATFORM_NAME: &str = "Linux";

const OSRELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// Kernel release, e.g. `6.5.0-14-generic`.
///
/// procfs reads are cheap and never block, so this is not memoized.
pub fn kernel_release() -> io::Result<String> {
    parse_osrelease(&fs::read_to_string(OSRELEASE_PATH)?)
}

pub fn parse_osrelease(raw: &str) -> io::Result<String> {
    let release = raw.trim();
    if release.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{OSRELEASE_PATH} is empty"),
        ));
    }
    Ok(release.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_distro_suffix() {
        assert_eq!(
            parse_osrelease("6.5.0-14-generic\n").unwrap(),
            "6.5.0-14-generic"
        );
    }

    #[test]
    fn rejects_blank_release() {
        assert!(parse_osrelease("\n").is_err());
    }
}
