//! Kernel library naming per platform family
//!
//! The kernel builds as a `cdylib` whose file name follows the platform's
//! dynamic library convention. Resolution is a plain table lookup.

use crate::error::DriverError;
use std::path::{Path, PathBuf};

/// Library stem shared by every platform
pub const KERNEL_LIB_STEM: &str = "squares_kernel";

/// Environment variable naming an explicit kernel library path
pub const KERNEL_PATH_ENV: &str = "SQUARES_KERNEL_PATH";

/// Platform families with distinct dynamic library conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and other Unix systems
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    /// Kernel library file name on this platform
    pub fn library_file_name(self) -> &'static str {
        match self {
            Platform::Windows => "squares_kernel.dll",
            Platform::MacOs => "libsquares_kernel.dylib",
            Platform::Unix => "libsquares_kernel.so",
        }
    }
}

/// Resolve where to load the kernel from
///
/// Precedence: `explicit` path, then the `SQUARES_KERNEL_PATH` value passed
/// as `env_path`, then the platform file name inside `library_dir`, then the
/// platform file name next to the running executable.
pub fn resolve_library_path(
    platform: Platform,
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    library_dir: Option<&Path>,
) -> Result<PathBuf, DriverError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }

    let dir = match library_dir {
        Some(dir) => dir.to_path_buf(),
        None => executable_dir()?,
    };
    Ok(dir.join(platform.library_file_name()))
}

/// Directory holding the running executable
fn executable_dir() -> Result<PathBuf, DriverError> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        DriverError::LibraryNotFound(format!(
            "executable path {} has no parent directory",
            exe.display()
        ))
    })
}
