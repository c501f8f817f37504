use crate::error::Result;

/// Read access to named values under `HKEY_LOCAL_MACHINE`.
///
/// `Ok(None)` means the key or the value does not exist, which is the normal
/// outcome when a product is not installed. `Err` is reserved for keys that
/// exist but cannot be read.
pub trait Registry {
    /// Look up `value_name` under `key_path`.
    fn lookup(&self, key_path: &str, value_name: &str) -> Result<Option<String>>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn lookup(&self, key_path: &str, value_name: &str) -> Result<Option<String>> {
        (**self).lookup(key_path, value_name)
    }
}

/// The host registry. On non-Windows hosts every lookup is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRegistry;

#[cfg(target_os = "windows")]
impl Registry for SystemRegistry {
    fn lookup(&self, key_path: &str, value_name: &str) -> Result<Option<String>> {
        use crate::error::LocatorError;
        use std::io::ErrorKind;
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
        use winreg::RegKey;

        let failed = |e: std::io::Error| LocatorError::Registry {
            key: key_path.to_string(),
            value: value_name.to_string(),
            message: e.to_string(),
        };

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = match hklm.open_subkey_with_flags(key_path, KEY_READ) {
            Ok(k) => k,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(failed(e)),
        };

        match key.get_value::<String, _>(value_name) {
            Ok(v) => Ok(non_empty(v)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(failed(e)),
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl Registry for SystemRegistry {
    fn lookup(&self, key_path: &str, value_name: &str) -> Result<Option<String>> {
        tracing::trace!(key_path, value_name, "no registry on this platform");
        Ok(None)
    }
}

/// Registry values are sometimes written as empty strings on uninstall.
pub(crate) fn non_empty(v: String) -> Option<String> {
    let v = v.trim_matches('"').to_string();
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_count_as_absent() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty("\"C:\\Steam\"".into()), Some("C:\\Steam".into()));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn system_registry_is_always_absent_off_windows() {
        let v = SystemRegistry
            .lookup(r"Software\Valve\Steam", "InstallPath")
            .unwrap();
        assert_eq!(v, None);
    }
}
