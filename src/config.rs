use crate::steam::consts::*;
use std::path::PathBuf;

/// Environment override for the Steam install root.
pub const ENV_STEAM_ROOT: &str = "STEAM_ROOT";

/// A registry value to read: key path under `HKEY_LOCAL_MACHINE` plus value name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryValue {
    /// Key path, e.g. `Software\Valve\Steam`.
    pub key: String,
    /// Value name, e.g. `InstallPath`.
    pub value: String,
}

impl RegistryValue {
    /// Create a key/value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What [`GamePathDetector`](crate::GamePathDetector) looks for and where.
///
/// `Default` describes Escape From Tarkov.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub(crate) app_id: u32,
    pub(crate) executable: String,
    pub(crate) steam_root: Option<PathBuf>,
    pub(crate) steam_keys: Vec<RegistryValue>,
    pub(crate) launcher_key: RegistryValue,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            app_id: EFT_APP_ID,
            executable: EFT_EXECUTABLE.to_string(),
            steam_root: None,
            steam_keys: STEAM_REGISTRY_KEYS
                .iter()
                .map(|k| RegistryValue::new(*k, STEAM_INSTALL_VALUE))
                .collect(),
            launcher_key: RegistryValue::new(LAUNCHER_UNINSTALL_KEY, LAUNCHER_INSTALL_VALUE),
        }
    }
}

impl DetectorConfig {
    /// Defaults plus the `STEAM_ROOT` override, if it names an existing directory.
    ///
    /// The override is only honored on Windows, the only host detection supports.
    pub fn from_env() -> Self {
        let cfg = Self::default();
        if !cfg!(target_os = "windows") {
            return cfg;
        }
        match std::env::var_os(ENV_STEAM_ROOT).map(PathBuf::from) {
            Some(p) if p.is_dir() => cfg.steam_root(p),
            _ => cfg,
        }
    }

    /// Set the Steam app id whose manifest is searched.
    pub fn app_id(mut self, app_id: u32) -> Self {
        self.app_id = app_id;
        self
    }

    /// Set the executable name used for version detection.
    pub fn executable(mut self, name: impl Into<String>) -> Self {
        self.executable = name.into();
        self
    }

    /// Use this Steam root instead of reading it from the registry.
    pub fn steam_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.steam_root = Some(path.into());
        self
    }

    /// Replace the registry values tried (in order) for the Steam root.
    pub fn steam_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = RegistryValue>,
    {
        self.steam_keys = keys.into_iter().collect();
        self
    }

    /// Replace the launcher uninstall entry.
    pub fn launcher_key(mut self, key: RegistryValue) -> Self {
        self.launcher_key = key;
        self
    }
}
