use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use eft_locator::{
    DetectorConfig, FileVersionReader, GameInstalledCheck, GamePathDetector, InstallSource,
    PreCheckOutcome, VersionDetector,
};

/// Locate an Escape From Tarkov install and run the installed-game pre-check.
#[derive(Parser)]
struct Args {
    /// Use this game directory instead of detecting one.
    #[arg(short, long)]
    game_dir: Option<PathBuf>,

    /// Steam install root (skips the registry lookup). Also read from STEAM_ROOT. Windows only.
    #[arg(long)]
    steam_root: Option<PathBuf>,

    /// Offer to retry a failed pre-check on stdin.
    #[arg(short, long)]
    interactive: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("EFT_LOCATOR_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn ask_retry(label: &str) -> io::Result<bool> {
    print!("[{label}] press Enter to retry, or type q to quit: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(!line.trim().eq_ignore_ascii_case("q"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = DetectorConfig::from_env();
    if let Some(root) = args.steam_root {
        config = config.steam_root(root);
    }

    let game_dir = match args.game_dir {
        Some(dir) => Some(dir),
        None if !cfg!(target_os = "windows") => {
            println!("Install detection is only available on Windows; pass --game-dir.");
            None
        }
        None => {
            let detector = GamePathDetector::system(config.clone());
            let found = tokio::task::spawn_blocking(move || detector.detect()).await??;
            match &found {
                Some(p) => println!(
                    "Detected {} install: {}",
                    match p.source() {
                        InstallSource::Steam => "Steam",
                        InstallSource::DirectLauncher => "launcher",
                    },
                    p.path().display()
                ),
                None => println!("No install detected."),
            }
            found.map(|p| p.into_path_buf())
        }
    };

    let mut task = GameInstalledCheck::for_config(game_dir.clone(), &config).into_task();
    let mut outcome = task.run().await?.clone();
    loop {
        let retry = match &outcome {
            PreCheckOutcome::Success { message } => {
                println!("[ok] {}: {message}", task.name());
                break;
            }
            PreCheckOutcome::Error { message, retry } => {
                println!("[failed] {}: {message}", task.name());
                retry.clone()
            }
        };

        match retry {
            Some(action) if args.interactive && ask_retry(action.label())? => {
                outcome = action.invoke(&mut task).await?.clone();
            }
            _ => break,
        }
    }

    if task.blocks_install() {
        anyhow::bail!("required pre-check '{}' did not pass", task.name());
    }

    let Some(game_dir) = game_dir else {
        return Ok(());
    };
    match VersionDetector::for_config(FileVersionReader, &config).detect(&game_dir) {
        Ok(version) => println!("Game version: {version}"),
        Err(e) => println!("Game version unavailable: {e}"),
    }

    Ok(())
}
