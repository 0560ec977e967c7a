//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the template directory, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trellis markup expander
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input markup file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output HTML file
    #[arg(short, long, default_value = "out.html")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding view templates, overrides the configuration
    #[arg(short, long)]
    pub templates: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["trellis", "page.tml"]);

        assert_eq!(args.input, "page.tml");
        assert_eq!(args.output, "out.html");
        assert_eq!(args.config, None);
        assert_eq!(args.templates, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "trellis",
            "page.tml",
            "-o",
            "page.html",
            "-c",
            "trellis.toml",
            "-t",
            "views",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.output, "page.html");
        assert_eq!(args.config.as_deref(), Some("trellis.toml"));
        assert_eq!(args.templates.as_deref(), Some("views"));
        assert_eq!(args.log_level, "debug");
    }
}
