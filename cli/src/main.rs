use anyhow::{Context, Result};
use cartvoice_core::{get_default_config_file, AssistantConfig, APP_NAME};
use cartvoice_dispatch::{InMemoryListStore, JsonFileListStore, ListStoreRef, ShoppingAssistant};
use clap::Parser;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};
use dotenv::dotenv;
use log::LevelFilter;
use std::fs;
use std::sync::Arc;

mod app;
mod cli;
mod logging;
mod output;

use crate::cli::Args;
use crate::logging::{log_error, log_info};
use crate::output::{print_list, print_statistics, print_suggestions, print_usage_instructions};

/// Map a configured level name to a filter, defaulting to warn
fn level_filter(level: Option<&str>) -> LevelFilter {
    level
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Warn,
        })
        .unwrap_or(LevelFilter::Warn)
}

/// Config file values with command-line overrides applied
fn load_config(args: &Args) -> Result<AssistantConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_default_config_file(APP_NAME)?,
    };
    let file_config = AssistantConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let overrides = AssistantConfig {
        history_limit: None,
        store_path: args.store.clone(),
        store_timeout_ms: None,
        enable_suggestions: args.no_suggestions.then_some(false),
        log_level: None,
        categories: None,
    };
    Ok(file_config.merge(&overrides))
}

/// Main function - Builds the assistant and runs the requested commands
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before clap reads them
    dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    let config = load_config(&args)?;

    // Initialize logger with configured log level, RUST_LOG wins
    let log_level = level_filter(config.log_level.as_deref());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();

    let store: ListStoreRef = if args.in_memory {
        log_info("Using in-memory list store");
        Arc::new(InMemoryListStore::new())
    } else {
        let path = config.store_path()?;
        log_info(&format!("Using list file {}", path.display()));
        Arc::new(JsonFileListStore::new(path))
    };

    let assistant = ShoppingAssistant::from_config(&config, store)
        .context("Failed to initialize the shopping assistant")?;

    // A broken list file should not stop the user from adding items
    match assistant.dispatcher().load().await {
        Ok(count) => log_info(&format!("Loaded {} items", count)),
        Err(e) => {
            log_error(&format!("Failed to load shopping list: {}", e));
            eprintln!("{}", "Starting with an empty list.".yellow());
        }
    }

    let mut acted = false;

    if args.clear {
        acted = true;
        let confirmed = args.yes
            || Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Are you sure you want to clear your entire shopping list?")
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;
        if confirmed {
            match assistant.dispatcher().clear().await {
                Ok(()) => println!("{}", "Shopping list cleared successfully".green()),
                Err(e) => {
                    log_error(&format!("Failed to clear shopping list: {}", e));
                    eprintln!("{}", "Failed to clear shopping list".red());
                }
            }
        }
    }

    if let Some(command) = args.command.clone() {
        acted = true;
        if let Err(e) = app::run_single_command(&assistant, command, args.confidence).await {
            log_error(&format!("Error processing command: {}", e));
        }
    }

    if args.list {
        acted = true;
        print_list(&assistant.dispatcher().items().await);
    }

    if args.stats {
        acted = true;
        print_statistics(&assistant.dispatcher().statistics().await);
    }

    if args.suggest {
        acted = true;
        print_suggestions(&assistant.dispatcher().suggestions().await);
    }

    if let Some(path) = &args.export {
        acted = true;
        let json = assistant.dispatcher().export_json().await?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "{} {}",
            "Shopping list exported to".green(),
            path.display()
        );
    }

    if args.interactive {
        acted = true;
        if let Err(e) = app::run_interactive(&assistant).await {
            log_error(&format!("Error in interactive session: {}", e));
            eprintln!("{}", format!("Interactive session failed: {}", e).red());
        }
    }

    if !acted {
        print_usage_instructions();
    }

    Ok(())
}
