#![doc = r#"
`eft-locator` finds an existing Escape From Tarkov install and runs the
installer's pre-flight checks against it.

Core capabilities:
- Resolve the game directory from Steam (library folders + app manifest) or
  from the Battlestate Games launcher's uninstall entry, preferring Steam
- Read the game build number from the executable's product version
- Run named, retryable pre-checks with structured outcomes

Registry and version-resource access only exist on Windows; on other hosts
detection degrades to "not found" instead of failing.

```no_run
# async fn demo() -> eft_locator::Result<()> {
use eft_locator::{detect_game_path, GameInstalledCheck};

let path = detect_game_path()?.map(|p| p.into_path_buf());
let mut task = GameInstalledCheck::new(path).into_task();
let outcome = task.run().await?;
println!("{}", outcome.message());
# Ok(())
# }
```
"#]

mod config;
mod detect;
mod error;
mod platform;
mod precheck;
mod registry;
mod steam;
mod version;

pub use crate::config::{DetectorConfig, RegistryValue, ENV_STEAM_ROOT};
pub use crate::detect::{detect_game_path, GamePathDetector, InstallSource, ResolvedGamePath};
pub use crate::error::{LocatorError, Result};
pub use crate::precheck::installed::{GameInstalledCheck, GAME_INSTALLED_TASK};
pub use crate::precheck::{
    PreCheck, PreCheckOutcome, PreCheckTask, RetryAction, TaskState, RETRY_LABEL,
};
pub use crate::registry::{Registry, SystemRegistry};
pub use crate::version::{
    version_token, FileVersionReader, ProductVersionReader, VersionDetector, VersionToken,
};

pub use crate::steam::library::library_roots;
pub use crate::steam::manifest::find_game_dir;
pub use crate::steam::vdf::{extract_fields, extract_fields_from_str};

/// Async trait support for implementing [`PreCheck`] outside this crate.
pub use async_trait::async_trait;
