use cartvoice_core::{CommandHistoryEntry, ListItem, Outcome, Suggestion};
use cartvoice_dispatch::ListStatistics;
use colored::*;

/// Print the result of one command
pub fn print_outcome(outcome: &Outcome) {
    if outcome.success {
        println!("{} {}", "✓".green().bold(), outcome.message.green());
    } else {
        println!("{} {}", "✗".red().bold(), outcome.message.red());
    }
    for line in &outcome.results {
        println!("    {}", line);
    }
}

/// Print the list grouped by category
pub fn print_list(items: &[ListItem]) {
    if items.is_empty() {
        println!("{}", "Your shopping list is empty.".yellow());
        return;
    }

    let mut categories: Vec<&str> = items.iter().map(|item| item.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    for category in categories {
        println!("{}", category.cyan().bold());
        for item in items.iter().filter(|item| item.category == category) {
            let mark = if item.completed { "[x]" } else { "[ ]" };
            let line = format!("  {} {} x{}", mark, item.name, item.quantity);
            if item.completed {
                println!("{}", line.dimmed());
            } else {
                println!("{}", line);
            }
        }
    }
}

pub fn print_statistics(stats: &ListStatistics) {
    println!("{}", "List statistics".yellow().bold());
    println!("  Total items:     {}", stats.total_items);
    println!("  Completed:       {}", stats.completed_items);
    println!("  Pending:         {}", stats.pending_items);
    println!("  Completion rate: {}%", stats.completion_rate);
    if !stats.items_by_category.is_empty() {
        println!("  {}", "By category:".cyan());
        for (category, count) in &stats.items_by_category {
            println!("    {:<12} {}", category, count);
        }
    }
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("{}", "No suggestions right now.".yellow());
        return;
    }
    println!("{}", "You might also need:".yellow().bold());
    for suggestion in suggestions {
        println!(
            "  {} ({}) - {}",
            suggestion.name.green(),
            suggestion.category,
            suggestion.reason.dimmed()
        );
    }
}

pub fn print_history(entries: &[CommandHistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No commands yet.".yellow());
        return;
    }
    for entry in entries {
        println!(
            "  {} {} {}",
            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
            entry.command,
            format!("({:.0}%)", entry.confidence * 100.0).dimmed()
        );
    }
}

/// Show usage instructions when no command or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "cartvoice \"add two bottles of milk\"".green().bold());
    println!("    Run a single command against your list");
    println!();
    println!("  {}", "cartvoice -i".green().bold());
    println!("    Start an interactive session");
    println!();
    println!("{}", "Commands:".cyan());
    println!("  add / put / buy / i need <item> [to my list]");
    println!("  remove / delete <item> [from my list], take <item> off my list");
    println!("  find / search for / look for / show me <item>");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --list                   Show the current list");
    println!("  --stats                  Show list statistics");
    println!("  --suggest                Show suggested items");
    println!("  --export <PATH>          Write the list as JSON");
    println!("  --clear                  Delete every item");
    println!("  --in-memory              Do not read or write the list file");
    println!("  --store <PATH>           Use a different list file");
    println!("  --help                   Show this help message");
    println!();
}
