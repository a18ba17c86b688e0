use clap::Parser;
use std::path::PathBuf;

/// Voice-style shopping list assistant. Commands are typed transcripts,
/// e.g. "add two bottles of milk" or "remove bread from my list".
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The command to run, e.g. "add milk to my list"
    #[arg(index = 1)] // Positional argument
    pub command: Option<String>,

    /// Enter interactive mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Print the current list
    #[arg(short, long, default_value_t = false)]
    pub list: bool,

    /// Print list statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Print suggested items for the current list
    #[arg(long, default_value_t = false)]
    pub suggest: bool,

    /// Write the list as JSON to the given file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Delete every item on the list
    #[arg(long, default_value_t = false)]
    pub clear: bool,

    /// Skip confirmation prompts
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,

    /// Keep the list in memory only; nothing is written to disk
    #[arg(long, default_value_t = false)]
    pub in_memory: bool,

    /// Path to the JSON list file
    #[arg(long, env = "CARTVOICE_STORE")]
    pub store: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long, env = "CARTVOICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable the recommender
    #[arg(long, default_value_t = false)]
    pub no_suggestions: bool,

    /// Recognizer confidence to attach to the command
    #[arg(long, default_value_t = 1.0)]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cartvoice", "add milk"]);
        assert_eq!(args.command.as_deref(), Some("add milk"));
        assert!(!args.interactive);
        assert!(!args.in_memory);
        assert_eq!(args.confidence, 1.0);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "cartvoice",
            "--clear",
            "-y",
            "--store",
            "/tmp/list.json",
            "--confidence",
            "0.4",
        ]);
        assert!(args.clear);
        assert!(args.yes);
        assert_eq!(args.store, Some(PathBuf::from("/tmp/list.json")));
        assert!((args.confidence - 0.4).abs() < f32::EPSILON);
        assert!(args.command.is_none());
    }
}
