use crate::config::DetectorConfig;
use crate::error::{LocatorError, Result};
use crate::steam::consts::EFT_EXECUTABLE;
use std::fmt;
use std::path::{Path, PathBuf};

/// Build number extracted from the executable's product version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(String);

impl VersionToken {
    /// Token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of an executable's product-version string.
pub trait ProductVersionReader {
    /// Raw `ProductVersion` of the executable at `exe`.
    fn product_version(&self, exe: &Path) -> Result<String>;
}

/// Reads the `ProductVersion` string from a PE version resource.
///
/// Only implemented on Windows; elsewhere the metadata is reported as unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileVersionReader;

impl ProductVersionReader for FileVersionReader {
    fn product_version(&self, exe: &Path) -> Result<String> {
        read_product_version(exe).map_err(|message| LocatorError::VersionUnreadable {
            path: exe.to_path_buf(),
            message,
        })
    }
}

/// Reads the game executable's version metadata and reduces it to a [`VersionToken`].
#[derive(Debug, Clone)]
pub struct VersionDetector<V = FileVersionReader> {
    reader: V,
    executable: String,
}

impl Default for VersionDetector<FileVersionReader> {
    fn default() -> Self {
        Self::new(FileVersionReader)
    }
}

impl<V: ProductVersionReader> VersionDetector<V> {
    /// Detector for `EscapeFromTarkov.exe` using `reader`.
    pub fn new(reader: V) -> Self {
        Self {
            reader,
            executable: EFT_EXECUTABLE.to_string(),
        }
    }

    /// Detector for the executable named in `config`.
    pub fn for_config(reader: V, config: &DetectorConfig) -> Self {
        Self::new(reader).executable(config.executable.clone())
    }

    /// Use another executable name inside the game directory.
    pub fn executable(mut self, name: impl Into<String>) -> Self {
        self.executable = name.into();
        self
    }

    /// Path of the executable inside `game_dir`.
    pub fn executable_path(&self, game_dir: &Path) -> PathBuf {
        game_dir.join(&self.executable)
    }

    /// Version token of the game installed in `game_dir`.
    pub fn detect(&self, game_dir: &Path) -> Result<VersionToken> {
        let exe = self.executable_path(game_dir);
        if !exe.is_file() {
            return Err(LocatorError::VersionUnreadable {
                path: exe,
                message: "executable does not exist".into(),
            });
        }

        let raw = self.reader.product_version(&exe)?;
        let token = version_token(&raw)?;
        tracing::info!(raw = %raw, version = %token, "detected game version");
        Ok(token)
    }
}

/// Second-to-last component of a product version, with `-` treated as `.`.
///
/// `"0.16.1.3-35392"` splits into `["0", "16", "1", "3", "35392"]` and yields `"3"`.
pub fn version_token(raw: &str) -> Result<VersionToken> {
    let normalized = raw.trim().replace('-', ".");
    let parts: Vec<&str> = normalized.split('.').collect();

    match parts.len().checked_sub(2).map(|i| parts[i]) {
        Some(token) if !token.is_empty() => Ok(VersionToken(token.to_string())),
        _ => Err(LocatorError::VersionFormat {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(target_os = "windows")]
fn read_product_version(exe: &Path) -> std::result::Result<String, String> {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::{
        GetFileVersionInfoSizeW, GetFileVersionInfoW, VerQueryValueW,
    };

    fn wide(s: impl AsRef<std::ffi::OsStr>) -> Vec<u16> {
        s.as_ref().encode_wide().chain(std::iter::once(0)).collect()
    }

    let file = wide(exe.as_os_str());
    let mut handle = 0u32;
    // SAFETY: `file` is a NUL-terminated UTF-16 string that outlives the call.
    let size = unsafe { GetFileVersionInfoSizeW(file.as_ptr(), &mut handle) };
    if size == 0 {
        return Err(std::io::Error::last_os_error().to_string());
    }

    // u16-backed so resource strings inside it are 2-byte aligned.
    let mut block = vec![0u16; (size as usize).div_ceil(2)];
    // SAFETY: `block` holds at least `size` bytes as reported above.
    let ok = unsafe {
        GetFileVersionInfoW(file.as_ptr(), 0, size, block.as_mut_ptr() as *mut c_void)
    };
    if ok == 0 {
        return Err(std::io::Error::last_os_error().to_string());
    }

    let query = |sub_block: &str| -> Option<(*const u8, u32)> {
        let sub = wide(sub_block);
        let mut ptr: *mut c_void = std::ptr::null_mut();
        let mut len = 0u32;
        // SAFETY: `block` holds the version resource; the returned pointer points into it.
        let ok = unsafe {
            VerQueryValueW(block.as_ptr() as *const c_void, sub.as_ptr(), &mut ptr, &mut len)
        };
        (ok != 0 && !ptr.is_null() && len > 0).then_some((ptr as *const u8, len))
    };

    // First declared language/codepage, falling back to en-US/Unicode.
    let lang_cp = match query(r"\VarFileInfo\Translation") {
        Some((ptr, len)) if len >= 4 => {
            // SAFETY: the translation table is at least one (u16, u16) pair.
            let (lang, cp) = unsafe {
                (
                    std::ptr::read_unaligned(ptr as *const u16),
                    std::ptr::read_unaligned((ptr as *const u16).add(1)),
                )
            };
            format!("{lang:04x}{cp:04x}")
        }
        _ => "040904b0".to_string(),
    };

    let (ptr, len) = query(&format!(r"\StringFileInfo\{lang_cp}\ProductVersion"))
        .ok_or_else(|| "ProductVersion missing from version resource".to_string())?;
    // SAFETY: string values are `len` UTF-16 units including the terminator.
    let units: Vec<u16> = (0..len as usize)
        .map(|i| unsafe { std::ptr::read_unaligned((ptr as *const u16).add(i)) })
        .take_while(|&u| u != 0)
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

#[cfg(not(target_os = "windows"))]
fn read_product_version(_exe: &Path) -> std::result::Result<String, String> {
    Err("file version info is only available on Windows".to_string())
}
