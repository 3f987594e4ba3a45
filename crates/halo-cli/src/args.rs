//! Command-line argument definitions for the Halo CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input data set, the viewport and view
//! modes, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Halo layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph data set (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Viewport width
    #[arg(long, default_value_t = 1000.0)]
    pub width: f32,

    /// Viewport height
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,

    /// View type (word, statement, openquestion, ...)
    #[arg(long, default_value = "word")]
    pub view: String,

    /// Lay out in global preview mode
    #[arg(long)]
    pub preview: bool,

    /// Node id to show in detail mode; repeatable
    #[arg(long = "detail", value_name = "ID")]
    pub detail: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["halo", "graph.json"]);
        assert_eq!(args.input, "graph.json");
        assert_eq!(args.output, None);
        assert_eq!(args.width, 1000.0);
        assert_eq!(args.height, 800.0);
        assert_eq!(args.view, "word");
        assert!(!args.preview);
        assert!(args.detail.is_empty());
    }

    #[test]
    fn test_repeated_detail() {
        let args = Args::parse_from([
            "halo",
            "graph.json",
            "--view",
            "statement",
            "--preview",
            "--detail",
            "a",
            "--detail",
            "b",
            "-o",
            "out.json",
        ]);
        assert_eq!(args.view, "statement");
        assert!(args.preview);
        assert_eq!(args.detail, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(args.output.as_deref(), Some("out.json"));
    }
}
