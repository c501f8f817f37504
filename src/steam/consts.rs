/// Steam App ID for Escape From Tarkov.
pub(crate) const EFT_APP_ID: u32 = 3932890;

/// Main game executable, relative to the game directory.
pub(crate) const EFT_EXECUTABLE: &str = "EscapeFromTarkov.exe";

/// Uninstall entry written by the Battlestate Games launcher (under HKLM).
pub(crate) const LAUNCHER_UNINSTALL_KEY: &str =
    r"Software\Wow6432Node\Microsoft\Windows\CurrentVersion\Uninstall\EscapeFromTarkov";
pub(crate) const LAUNCHER_INSTALL_VALUE: &str = "InstallLocation";

/// Steam client install entries (under HKLM), 64-bit view first.
pub(crate) const STEAM_REGISTRY_KEYS: [&str; 2] =
    [r"Software\Wow6432Node\Valve\Steam", r"Software\Valve\Steam"];
pub(crate) const STEAM_INSTALL_VALUE: &str = "InstallPath";

/// Subdirectory of the Steam game dir that only exists once content is actually on disk.
pub(crate) const STEAM_BUILD_DIR_NAME: &str = "build";

/// VDF fields consumed by the resolver.
pub(crate) const VDF_FIELD_LIBRARY_PATH: &str = "path";
pub(crate) const VDF_FIELD_INSTALL_DIR: &str = "installdir";
