use crate::precheck::TaskState;
use std::path::PathBuf;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, LocatorError>;

/// Error type for `eft-locator`.
///
/// Absence (no registry key, no manifest, no library) is never an error; it is
/// reported as `None` by the lookup that found nothing.
#[derive(thiserror::Error, Debug)]
pub enum LocatorError {
    /// A key/value document (`libraryfolders.vdf`, `appmanifest_*.acf`) could not be read.
    #[error("failed reading {}: {source}", path.display())]
    Document {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Registry key exists but could not be read.
    #[error("registry read failed for {key}\\{value}: {message}")]
    Registry {
        /// Key path under `HKEY_LOCAL_MACHINE`.
        key: String,
        /// Value name.
        value: String,
        /// Human-readable message.
        message: String,
    },

    /// Executable is missing or its version metadata could not be read.
    #[error("File not found: {}: {message}", path.display())]
    VersionUnreadable {
        /// Executable path.
        path: PathBuf,
        /// Human-readable cause.
        message: String,
    },

    /// Product version string lacks the expected dotted structure.
    #[error("unexpected product version format: {raw:?}")]
    VersionFormat {
        /// Raw product version string.
        raw: String,
    },

    /// A pre-check was asked to run from a state that does not allow it.
    #[error("pre-check '{task}' cannot be evaluated from state {from:?}")]
    InvalidTransition {
        /// Task display name.
        task: String,
        /// State the task was in.
        from: TaskState,
    },

    /// Field pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
