use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// List available themes (default)
    #[command(alias = "ls")]
    List {
        /// Show only builtin themes
        #[arg(long)]
        builtin: bool,

        /// Show only user themes
        #[arg(long)]
        user: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate user theme files
    #[command(alias = "c")]
    Check,

    /// Print a theme's CSS variables
    Css {
        /// Theme id
        id: String,
    },

    /// Create a new user theme file
    #[command(alias = "new")]
    Create {
        /// Theme name
        name: String,

        /// Base theme to copy colors from
        #[arg(short, long)]
        base: Option<String>,
    },

    /// Print the user themes folder
    #[command(alias = "o")]
    Open,
}
