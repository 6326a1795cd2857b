//! Headless battle runner.
//!
//! Loads content, plays one encounter with every combatant driven by the
//! decision policy and prints the battle log to stdout. Defeats are retried
//! with a healed party as many times as `BATTLE_RETRIES` allows.
//!
//! ```bash
//! BATTLE_ENCOUNTER=slime_king BATTLE_SEED=7 BATTLE_RETRIES=2 cargo run -p battle-cli
//! ```
mod config;
mod logging;

use anyhow::{Context, Result};
use battle_content::{Content, ContentFactory};
use battle_runtime::{Battle, BattleEvent, Event, RetryChoice, ScriptedActionProvider, Topic};
use tokio::sync::broadcast::{self, error::RecvError};

use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::info!(?config, "starting headless battle");

    let content = load_content(&config)?;
    let retries = std::iter::repeat_n(RetryChoice::ResumeHealed, config.retries as usize);
    let mut battle = Battle::builder()
        .config(config.runtime())
        .content(&content)
        .encounter(config.encounter.as_str())
        .seed(config.seed)
        .provider(ScriptedActionProvider::default().with_retries(retries))
        .build()
        .context("failed to set up the battle")?;

    let handle = battle.handle();
    let printer = tokio::spawn(print_log(handle.subscribe(Topic::Log)));

    let outcome = battle.run_with_retries(config.retries).await?;
    // Closing the bus lets the printer drain what is left and exit.
    drop(handle);
    drop(battle);
    printer.await?;

    tracing::info!(%outcome, "headless battle finished");
    println!("Result: {outcome}");
    Ok(())
}

fn load_content(config: &CliConfig) -> Result<Content> {
    match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load()
            .with_context(|| format!("failed to load content from {}", dir.display())),
        None => ContentFactory::builtin(),
    }
}

async fn print_log(mut log: broadcast::Receiver<Event>) {
    loop {
        match log.recv().await {
            Ok(event) => print_line(event.into_inner()),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "log printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn print_line(event: BattleEvent) {
    if let BattleEvent::Log { text, emphasis, .. } = event {
        if emphasis {
            println!("** {text}");
        } else {
            println!("{text}");
        }
    }
}
