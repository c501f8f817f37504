//! Integration tests for the installed-game pre-check and its retry loop.
use eft_locator::{
    async_trait, GameInstalledCheck, PreCheck, PreCheckOutcome, PreCheckTask, Result, TaskState,
    GAME_INSTALLED_TASK,
};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn retry_succeeds_once_the_game_is_installed() {
    let d = tempdir().unwrap();
    let game = d.path().join("EFT");
    fs::create_dir_all(&game).unwrap();

    let mut task = GameInstalledCheck::new(Some(game.clone())).into_task();
    assert_eq!(task.name(), GAME_INSTALLED_TASK);
    assert!(task.is_required());

    let retry = match task.run().await.unwrap() {
        PreCheckOutcome::Error {
            retry: Some(retry), ..
        } => retry.clone(),
        other => panic!("expected retryable error, got {other:?}"),
    };
    assert_eq!(task.state(), TaskState::Failed);

    fs::write(game.join("EscapeFromTarkov.exe"), b"MZ").unwrap();

    let outcome = retry.invoke(&mut task).await.unwrap();
    assert!(outcome.is_success());
    assert!(outcome.message().starts_with("EFT install folder found."));
    assert_eq!(task.state(), TaskState::Succeeded);
}

#[tokio::test]
async fn undetected_install_blocks_until_resolved() {
    let mut task = GameInstalledCheck::new(None).into_task();
    task.run().await.unwrap();
    assert!(task.blocks_install());

    // re-evaluation is independent of the previous run but sees the same input
    let outcome = task.request_reevaluation().await.unwrap();
    assert!(!outcome.is_success());
    assert!(task.blocks_install());
}

struct AlwaysWarn;

#[async_trait]
impl PreCheck for AlwaysWarn {
    async fn check(&self) -> Result<PreCheckOutcome> {
        Ok(PreCheckOutcome::error("free space is low"))
    }
}

#[tokio::test]
async fn optional_check_without_retry_does_not_block() {
    let mut task = PreCheckTask::new("Free Space", false, AlwaysWarn);
    let outcome = task.run().await.unwrap();
    assert!(outcome.retry().is_none());
    assert_eq!(task.state(), TaskState::Failed);
    assert!(!task.blocks_install());
}
