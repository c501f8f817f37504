use crate::config::{DetectorConfig, RegistryValue};
use crate::error::Result;
use crate::platform::path::trim_trailing_separator;
use crate::registry::{non_empty, Registry, SystemRegistry};
use crate::steam::consts::STEAM_BUILD_DIR_NAME;
use crate::steam::{library, manifest};
use std::path::{Path, PathBuf};

/// Where a resolved install came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    /// Battlestate Games launcher (uninstall registry entry).
    DirectLauncher,
    /// Steam library (app manifest).
    Steam,
}

/// An absolute game directory without a trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGamePath {
    path: PathBuf,
    source: InstallSource,
}

impl ResolvedGamePath {
    fn new(path: &Path, source: InstallSource) -> Self {
        Self {
            path: trim_trailing_separator(path),
            source,
        }
    }

    /// Game directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Which strategy produced this path.
    pub fn source(&self) -> InstallSource {
        self.source
    }

    /// Take the directory.
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

/// Finds the game directory, preferring a Steam install over the launcher one.
///
/// Order:
/// - Steam root (override or registry) -> `libraryfolders.vdf` -> `appmanifest_<id>.acf`,
///   accepted only if `<game>/build` exists
/// - launcher uninstall entry (`InstallLocation`)
#[derive(Debug, Clone)]
pub struct GamePathDetector<R = SystemRegistry> {
    registry: R,
    config: DetectorConfig,
}

impl GamePathDetector<SystemRegistry> {
    /// Detector over the host registry.
    pub fn system(config: DetectorConfig) -> Self {
        Self::new(SystemRegistry, config)
    }
}

impl<R: Registry> GamePathDetector<R> {
    /// Detector over any registry implementation.
    pub fn new(registry: R, config: DetectorConfig) -> Self {
        Self { registry, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Best install path, or `None` if neither source has one.
    pub fn detect(&self) -> Result<Option<ResolvedGamePath>> {
        if let Some(steam_game) = self.detect_steam()? {
            tracing::info!(path = %steam_game.display(), "using Steam install");
            return Ok(Some(ResolvedGamePath::new(
                &steam_game,
                InstallSource::Steam,
            )));
        }

        if let Some(launcher_game) = self.detect_launcher()? {
            tracing::info!(path = %launcher_game.display(), "using launcher install");
            return Ok(Some(ResolvedGamePath::new(
                &launcher_game,
                InstallSource::DirectLauncher,
            )));
        }

        tracing::info!("no game install found");
        Ok(None)
    }

    /// Steam client install root: configured override, else the first registry hit.
    pub fn steam_root(&self) -> Result<Option<PathBuf>> {
        if let Some(root) = &self.config.steam_root {
            return Ok(Some(root.clone()));
        }
        for key in &self.config.steam_keys {
            if let Some(v) = self.read(key)? {
                return Ok(Some(PathBuf::from(v)));
            }
        }
        Ok(None)
    }

    /// The `build` directory of the Steam install, if Steam has the game on disk.
    ///
    /// Steam's manifest bookkeeping lags behind fresh installs, so the manifest
    /// alone is not trusted; the on-disk `build` directory is the signal.
    pub fn detect_steam(&self) -> Result<Option<PathBuf>> {
        let Some(steam_root) = self.steam_root()? else {
            tracing::debug!("Steam not installed");
            return Ok(None);
        };

        let roots = library::library_roots(&steam_root)?;
        let Some(game_dir) = manifest::find_game_dir(&roots, self.config.app_id)? else {
            tracing::debug!(app_id = self.config.app_id, "game not in any Steam library");
            return Ok(None);
        };

        let build = game_dir.join(STEAM_BUILD_DIR_NAME);
        if !build.is_dir() {
            tracing::debug!(path = %build.display(), "Steam game dir has no build directory");
            return Ok(None);
        }
        Ok(Some(build))
    }

    /// `InstallLocation` from the launcher's uninstall entry, made absolute.
    pub fn detect_launcher(&self) -> Result<Option<PathBuf>> {
        let Some(location) = self.read(&self.config.launcher_key)? else {
            tracing::debug!("no launcher uninstall entry");
            return Ok(None);
        };
        let path = PathBuf::from(location);
        Ok(Some(std::path::absolute(&path).unwrap_or(path)))
    }

    fn read(&self, key: &RegistryValue) -> Result<Option<String>> {
        Ok(self.registry.lookup(&key.key, &key.value)?.and_then(non_empty))
    }
}

/// Detect the game with the host registry and [`DetectorConfig::from_env`].
///
/// Always `Ok(None)` off Windows.
pub fn detect_game_path() -> Result<Option<ResolvedGamePath>> {
    if !cfg!(target_os = "windows") {
        tracing::debug!("install detection is Windows-only");
        return Ok(None);
    }
    GamePathDetector::system(DetectorConfig::from_env()).detect()
}
