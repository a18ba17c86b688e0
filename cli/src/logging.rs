use colored::*;
use log::info;

// Status lines go through the configured logger; errors are always shown

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
