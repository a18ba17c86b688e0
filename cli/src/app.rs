use anyhow::{Context, Result};
use cartvoice_core::Transcript;
use cartvoice_dispatch::ShoppingAssistant;
use colored::*;
use log::{debug, info};
use std::io::{self, Write};

use crate::output::{
    print_history, print_list, print_outcome, print_statistics, print_suggestions,
    print_usage_instructions,
};

/// Runs a single command against the list and prints the outcome
pub async fn run_single_command(
    assistant: &ShoppingAssistant,
    command: String,
    confidence: f32,
) -> Result<()> {
    info!("Running single command: {}", command);

    let outcome = assistant
        .handle_transcript(Transcript::new(command, confidence))
        .await;
    print_outcome(&outcome);

    Ok(())
}

/// Runs an interactive session, one command per line
pub async fn run_interactive(assistant: &ShoppingAssistant) -> Result<()> {
    println!("Starting interactive shopping session.");
    println!("Type 'list', 'history', 'suggest', 'stats' or 'help'. Type 'exit' or 'quit' to end the session.");
    println!();

    loop {
        // Prompt for user input
        print!("{}: ", "You".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            // stdin closed
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Exiting shopping session.");
                break;
            }
            "list" => print_list(&assistant.dispatcher().items().await),
            "history" => print_history(&assistant.history(20).await),
            "suggest" => print_suggestions(&assistant.dispatcher().suggestions().await),
            "stats" => print_statistics(&assistant.dispatcher().statistics().await),
            "help" => print_usage_instructions(),
            _ => {
                debug!("Handling typed command: {}", input);
                let outcome = assistant.handle_transcript(Transcript::typed(input)).await;
                print_outcome(&outcome);
            }
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}
