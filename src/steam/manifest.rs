use crate::error::Result;
use crate::steam::consts::VDF_FIELD_INSTALL_DIR;
use crate::steam::paths::{app_manifest, game_dir_in_library};
use crate::steam::vdf::extract_fields;
use std::path::PathBuf;

/// Find the game directory for `app_id` across Steam library roots.
///
/// Steam does not always rewrite `libraryfolders.vdf` after a fresh install, so
/// every library is searched for `appmanifest_<app_id>.acf` and the first one
/// with an `installdir` wins.
pub fn find_game_dir(roots: &[PathBuf], app_id: u32) -> Result<Option<PathBuf>> {
    for root in roots {
        let manifest = app_manifest(root, app_id);
        if !manifest.is_file() {
            tracing::debug!(library = %root.display(), "no app manifest in library");
            continue;
        }

        let install_dirs = extract_fields(&manifest, VDF_FIELD_INSTALL_DIR)?;
        if let Some(dir) = install_dirs.first() {
            return Ok(Some(game_dir_in_library(root, dir)));
        }
        tracing::debug!(manifest = %manifest.display(), "app manifest has no installdir");
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_manifest_without_installdir() {
        let d = tempdir().unwrap();
        let a = d.path().join("a");
        let b = d.path().join("b");
        for (root, body) in [(&a, "\"name\" \"x\"\n"), (&b, "\t\"installdir\"\t\"EFT\"\n")] {
            fs::create_dir_all(root.join("steamapps")).unwrap();
            fs::write(root.join("steamapps/appmanifest_42.acf"), body).unwrap();
        }

        let found = find_game_dir(&[a, b.clone()], 42).unwrap();
        assert_eq!(found, Some(b.join("steamapps").join("common").join("EFT")));
    }

    #[test]
    fn no_roots_means_not_found() {
        assert_eq!(find_game_dir(&[], 42).unwrap(), None);
    }
}
