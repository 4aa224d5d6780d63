//! Default install locations of Qt's `moc` per platform.

use std::path::PathBuf;

/// Install path of `moc` for the Qt 5.6.0 SDK layout on `os`/`arch`.
///
/// `os` and `arch` use the spelling of [`std::env::consts`].
pub fn moc_install_path(os: &str, arch: &str) -> Option<&'static str> {
    match (os, arch) {
        ("macos", _) => Some("/usr/local/Qt5.6.0/5.6/clang_64/bin/moc"),
        ("linux", "x86_64") => Some("/usr/local/Qt5.6.0/5.6/gcc_64/bin/moc"),
        ("linux", "x86") => Some("/usr/local/Qt5.6.0/5.6/gcc/bin/moc"),
        ("windows", _) => Some("C:\\Qt\\Qt5.6.0\\5.6\\mingw49_32\\bin\\moc.exe"),
        _ => None,
    }
}

/// Install path of `moc` for the platform this binary was built for.
pub fn default_moc_path() -> Option<PathBuf> {
    moc_install_path(std::env::consts::OS, std::env::consts::ARCH).map(PathBuf::from)
}
