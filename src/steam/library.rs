use crate::error::Result;
use crate::steam::consts::VDF_FIELD_LIBRARY_PATH;
use crate::steam::paths::libraryfolders_vdf;
use crate::steam::vdf::extract_fields;
use std::path::{Path, PathBuf};

/// Read Steam library roots from `<steam_root>/steamapps/libraryfolders.vdf`.
///
/// Roots are returned in file order and are not checked for existence here;
/// a missing document yields no roots.
pub fn library_roots(steam_root: &Path) -> Result<Vec<PathBuf>> {
    let libraryfolders = libraryfolders_vdf(steam_root);
    if !libraryfolders.is_file() {
        tracing::debug!(path = %libraryfolders.display(), "no libraryfolders.vdf");
        return Ok(vec![]);
    }

    let roots: Vec<PathBuf> = extract_fields(&libraryfolders, VDF_FIELD_LIBRARY_PATH)?
        .into_iter()
        .map(PathBuf::from)
        .collect();

    tracing::debug!(count = roots.len(), "steam library roots");
    Ok(roots)
}
