mod theme;

pub use theme::ThemeCommands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a palette from a description
    #[command(alias = "gen")]
    Generate {
        /// Free-text theme description, e.g. "warm sunset"
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Generate this many variations instead of a single theme
        #[arg(short, long)]
        variations: Option<usize>,

        /// Print JSON instead of CSS
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: type a description to generate a theme
    #[command(alias = "s")]
    Session {
        /// Write the active theme's CSS variables to this file
        #[arg(long)]
        css_out: Option<PathBuf>,
    },

    /// Manage themes
    #[command(alias = "themes")]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Show or reset configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// AI-generated color themes for the web
#[derive(Debug, Parser)]
#[command(name = "prism", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn prompt_text(words: &[String]) -> String {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_joins_words() {
        let cli = Cli::try_parse_from(["prism", "generate", "warm", "sunset", "-v", "2"]).unwrap();
        match cli.command {
            Some(Commands::Generate {
                prompt,
                variations,
                json,
            }) => {
                assert_eq!(Cli::prompt_text(&prompt), "warm sunset");
                assert_eq!(variations, Some(2));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["prism", "generate"]).is_err());
    }
}
