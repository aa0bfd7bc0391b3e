use serde::{Deserialize, Serialize};
use std::fmt;

/// Build target of a mod binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    #[serde(rename = "ios")]
    IOs,
    Android32,
    Android64,
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for, falling back to Linux.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "ios") {
            Self::IOs
        } else if cfg!(all(target_os = "android", target_pointer_width = "32")) {
            Self::Android32
        } else if cfg!(target_os = "android") {
            Self::Android64
        } else {
            Self::Linux
        }
    }

    /// File name suffix of a mod binary, including the leading dot.
    #[must_use]
    pub const fn artifact_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".dll",
            Self::MacOs => ".dylib",
            Self::IOs => ".ios.dylib",
            Self::Android32 => ".android32.so",
            Self::Android64 => ".android64.so",
            Self::Linux => ".so",
        }
    }

    /// Expected binary file name for the mod `id` on this platform.
    #[must_use]
    pub fn artifact_name(self, id: &str) -> String {
        format!("{id}{}", self.artifact_suffix())
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::IOs => "ios",
            Self::Android32 => "android32",
            Self::Android64 => "android64",
            Self::Linux => "linux",
        })
    }
}
