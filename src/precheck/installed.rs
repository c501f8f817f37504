use crate::config::DetectorConfig;
use crate::error::Result;
use crate::precheck::{PreCheck, PreCheckOutcome, PreCheckTask, RETRY_LABEL};
use crate::steam::consts::EFT_EXECUTABLE;
use async_trait::async_trait;
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Display name of the installed-game task.
pub const GAME_INSTALLED_TASK: &str = "EFT Installed";

const NOT_FOUND_MESSAGE: &str = "Your EFT installation could not be found, try running the Battlestate Games Launcher and ensure EFT is installed on your computer";

/// Verifies that a detected game directory exists and holds the game executable.
#[derive(Debug, Clone)]
pub struct GameInstalledCheck {
    game_dir: Option<PathBuf>,
    executable: String,
}

impl GameInstalledCheck {
    /// Check the directory produced by detection (`None` when detection found nothing).
    pub fn new(game_dir: Option<PathBuf>) -> Self {
        Self {
            game_dir,
            executable: EFT_EXECUTABLE.to_string(),
        }
    }

    /// Check `game_dir` for the executable named in `config`.
    pub fn for_config(game_dir: Option<PathBuf>, config: &DetectorConfig) -> Self {
        Self::new(game_dir).executable(config.executable.clone())
    }

    /// Expect another executable name inside the game directory.
    pub fn executable(mut self, name: impl Into<String>) -> Self {
        self.executable = name.into();
        self
    }

    /// Wrap into the required "EFT Installed" task.
    pub fn into_task(self) -> PreCheckTask {
        PreCheckTask::new(GAME_INSTALLED_TASK, true, self)
    }
}

#[async_trait]
impl PreCheck for GameInstalledCheck {
    async fn check(&self) -> Result<PreCheckOutcome> {
        let Some(dir) = &self.game_dir else {
            return Ok(PreCheckOutcome::error_with_retry(NOT_FOUND_MESSAGE, RETRY_LABEL));
        };

        if !metadata(dir).await?.is_some_and(|m| m.is_dir()) {
            return Ok(PreCheckOutcome::error_with_retry(NOT_FOUND_MESSAGE, RETRY_LABEL));
        }
        let exe = dir.join(&self.executable);
        if !metadata(&exe).await?.is_some_and(|m| m.is_file()) {
            tracing::debug!(path = %exe.display(), "game executable missing");
            return Ok(PreCheckOutcome::error_with_retry(NOT_FOUND_MESSAGE, RETRY_LABEL));
        }

        Ok(PreCheckOutcome::success(format!(
            "EFT install folder found. Game Path:\n\n{}",
            dir.display()
        )))
    }
}

async fn metadata(p: &Path) -> Result<Option<Metadata>> {
    match tokio::fs::metadata(p).await {
        Ok(m) => Ok(Some(m)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
