//! Windows version facts, read with `RtlGetVersion`.
//!
//! `GetVersionEx` lies to unmanifested processes, so the ntdll call is used.

pub const PLATFORM_NAME: &str = "Windows";

/// Version such as `10.0.19045`.
#[cfg(target_os = "windows")]
pub fn os_version() -> std::io::Result<String> {
    use windows_sys::Wdk::System::SystemServices::RtlGetVersion;
    use windows_sys::Win32::System::SystemInformation::OSVERSIONINFOW;

    // SAFETY: OSVERSIONINFOW is plain data; all-zero is a valid value.
    let mut info: OSVERSIONINFOW = unsafe { std::mem::zeroed() };
    info.dwOSVersionInfoSize = std::mem::size_of::<OSVERSIONINFOW>() as u32;

    // SAFETY: `info` is a live, correctly sized OSVERSIONINFOW.
    let status = unsafe { RtlGetVersion(&mut info) };
    if status != 0 {
        return Err(std::io::Error::other(format!(
            "RtlGetVersion failed with status {status:#x}"
        )));
    }

    Ok(format_version(
        info.dwMajorVersion,
        info.dwMinorVersion,
        info.dwBuildNumber,
    ))
}

pub fn format_version(major: u32, minor: u32, build: u32) -> String {
    format!("{major}.{minor}.{build}")
}
