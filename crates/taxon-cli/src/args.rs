//! Command-line argument definitions for the Taxon CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input and output, the DOT layout
//! and keyword options, and logging verbosity.

use clap::Parser;

/// Render a Taxon TOML document as Graphviz DOT
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input TOML file; standard input is read when omitted
    pub input: Option<String>,

    /// Write the DOT output to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Set a label for the graph (defaults to the input file stem)
    #[arg(long)]
    pub label: Option<String>,

    /// Generate a clustered graph
    #[arg(long)]
    pub cluster: bool,

    /// Make arcs directional
    #[arg(long, visible_alias = "directed")]
    pub digraph: bool,

    /// Emit a strict graph
    #[arg(long)]
    pub strict: bool,

    /// List the graph names declared in the document and exit
    #[arg(long)]
    pub graphs: bool,

    /// Run the built-in self-test suite and exit
    #[arg(long, conflicts_with_all = ["graphs", "input"])]
    pub test: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["taxon"]);

        assert_eq!(args.input, None);
        assert_eq!(args.output, None);
        assert!(!args.cluster && !args.digraph && !args.strict);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_directed_alias() {
        let args = Args::parse_from(["taxon", "--directed", "--cluster", "doc.toml"]);

        assert!(args.digraph);
        assert!(args.cluster);
        assert_eq!(args.input.as_deref(), Some("doc.toml"));
    }

    #[test]
    fn test_self_test_excludes_input() {
        assert!(Args::try_parse_from(["taxon", "--test", "doc.toml"]).is_err());
    }
}
