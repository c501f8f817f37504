use std::path::{Path, PathBuf};

pub(crate) fn steamapps_dir(library_root: &Path) -> PathBuf {
    library_root.join("steamapps")
}

pub(crate) fn common_dir(library_root: &Path) -> PathBuf {
    steamapps_dir(library_root).join("common")
}

/// `<root>/steamapps/libraryfolders.vdf`
pub(crate) fn libraryfolders_vdf(steam_root: &Path) -> PathBuf {
    steamapps_dir(steam_root).join("libraryfolders.vdf")
}

/// `<root>/steamapps/appmanifest_<app_id>.acf`
pub(crate) fn app_manifest(library_root: &Path, app_id: u32) -> PathBuf {
    steamapps_dir(library_root).join(format!("appmanifest_{app_id}.acf"))
}

/// `<root>/steamapps/common/<installdir>`
pub(crate) fn game_dir_in_library(library_root: &Path, install_dir: &str) -> PathBuf {
    common_dir(library_root).join(install_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_manifest_and_game_paths() {
        let root = Path::new("lib");
        assert_eq!(
            app_manifest(root, 3932890),
            Path::new("lib")
                .join("steamapps")
                .join("appmanifest_3932890.acf")
        );
        assert_eq!(
            game_dir_in_library(root, "Escape from Tarkov"),
            Path::new("lib")
                .join("steamapps")
                .join("common")
                .join("Escape from Tarkov")
        );
    }
}
